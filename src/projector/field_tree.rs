//! Object → two-column Field | Value sheet

use serde_json::{Map, Value};

use super::format::{format_cell_value, is_primitive, join_primitives};
use crate::error::{ConvertError, ConvertResult};
use crate::types::{
    Cell, CellStyle, ColumnSpec, Row, Sheet, SheetMode, FIELD_COLUMN_WIDTH, MAX_SHEET_ROWS,
    SECTION_FILL, VALUE_COLUMN_WIDTH,
};

/// Render `object` as indented field/value rows, nested objects inline.
///
/// Fails with a shape error when objects nest deeper than `max_depth`.
pub fn render_field_tree(
    sheet_name: &str,
    object: &Map<String, Value>,
    max_depth: usize,
) -> ConvertResult<Sheet> {
    let mut sheet = Sheet::new(sheet_name, SheetMode::FieldTree);
    sheet.set_columns(vec![
        ColumnSpec::new("Field", FIELD_COLUMN_WIDTH),
        ColumnSpec::new("Value", VALUE_COLUMN_WIDTH),
    ]);

    let mut walker = FieldTreeWalker {
        sheet: &mut sheet,
        max_depth,
    };
    walker.walk(object, 0, sheet_name)?;

    sheet.cap_rows(MAX_SHEET_ROWS);
    Ok(sheet)
}

struct FieldTreeWalker<'a> {
    sheet: &'a mut Sheet,
    max_depth: usize,
}

impl FieldTreeWalker<'_> {
    fn walk(
        &mut self,
        object: &Map<String, Value>,
        indent: usize,
        path: &str,
    ) -> ConvertResult<()> {
        for (key, value) in object {
            match value {
                Value::Object(child) => {
                    self.section_row(key, indent);
                    let child_path = format!("{}.{}", path, key);
                    if indent + 1 > self.max_depth {
                        return Err(ConvertError::Shape(format!(
                            "object nesting under '{}' exceeds the maximum depth of {}",
                            child_path, self.max_depth
                        )));
                    }
                    self.walk(child, indent + 1, &child_path)?;
                }
                Value::Array(items) if items.is_empty() => self.field_row(key, "[]", indent),
                Value::Array(items) if items.iter().all(is_primitive) => {
                    let joined = join_primitives(items);
                    self.field_row(key, &joined, indent)
                }
                Value::Array(items) => {
                    let info = format!("[Array of {} object(s)]", items.len());
                    self.field_row(key, &info, indent)
                }
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                    let text = format_cell_value(value);
                    self.field_row(key, &text, indent)
                }
            }
        }
        Ok(())
    }

    fn field_row(&mut self, field: &str, value: &str, indent: usize) {
        let field_style = CellStyle {
            indent: clamp_indent(indent),
            wrap: true,
            ..CellStyle::default()
        };
        let value_style = CellStyle {
            wrap: true,
            ..CellStyle::default()
        };
        self.sheet.push_row(Row::new(vec![
            Cell::styled(field, field_style),
            Cell::styled(value, value_style),
        ]));
    }

    /// Bold, filled row announcing a nested object
    fn section_row(&mut self, field: &str, indent: usize) {
        let row_style = CellStyle {
            bold: true,
            background: Some(SECTION_FILL),
            ..CellStyle::default()
        };
        let field_style = CellStyle {
            indent: clamp_indent(indent),
            wrap: true,
            ..row_style
        };
        self.sheet.push_row(Row::new(vec![
            Cell::styled(field, field_style),
            Cell::styled("", row_style),
        ]));
    }
}

fn clamp_indent(indent: usize) -> u8 {
    u8::try_from(indent).unwrap_or(u8::MAX)
}
