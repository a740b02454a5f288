//! Cell text rendering for JSON values

use serde_json::{Number, Value};

/// True for values rendered inline: null, booleans, numbers and strings
pub fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Render a JSON value as the text of a single cell.
///
/// Arrays made only of primitives become a `", "`-joined list; any other
/// array or object becomes its compact JSON text.
pub fn format_cell_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(is_primitive) => join_primitives(items),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Comma-and-space join of already-primitive values
pub fn join_primitives(items: &[Value]) -> String {
    items
        .iter()
        .map(format_cell_value)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortest decimal text that parses back to the same number.
///
/// Integral floats drop their fractional part ("1.0" renders as "1"), so a
/// number prints the same whether the source wrote it as an int or a float.
fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}
