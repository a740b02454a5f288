//! Array of objects → tabular sheet

use std::collections::HashSet;

use serde_json::Value;

use super::format::format_cell_value;
use super::{NO_DATA, NO_OBJECT_FIELDS};
use crate::types::{
    Cell, ColumnSpec, Row, Sheet, SheetMode, MAX_SHEET_COLUMNS, MAX_SHEET_ROWS, TABLE_COLUMN_WIDTH,
};

/// Render `items` as one row per element under a header of every key seen.
pub fn render_table(sheet_name: &str, items: &[Value]) -> Sheet {
    if items.is_empty() {
        return Sheet::placeholder(sheet_name, NO_DATA);
    }

    let mut columns = collect_columns(items);
    if columns.is_empty() {
        return Sheet::placeholder(sheet_name, NO_OBJECT_FIELDS);
    }

    let hidden_columns = cap_columns(&mut columns, MAX_SHEET_COLUMNS);
    let mut specs: Vec<ColumnSpec> = columns
        .iter()
        .map(|c| ColumnSpec::new(*c, TABLE_COLUMN_WIDTH))
        .collect();
    if hidden_columns > 0 {
        tracing::warn!(
            "Table sheet '{}' exceeds {} columns; {} column(s) left out",
            sheet_name,
            MAX_SHEET_COLUMNS,
            hidden_columns
        );
        specs.push(ColumnSpec::new(
            format!("[{} more column(s) not shown]", hidden_columns),
            TABLE_COLUMN_WIDTH,
        ));
    }

    let mut sheet = Sheet::new(sheet_name, SheetMode::Table);
    sheet.set_columns(specs);

    for item in items {
        let object = item.as_object();
        let cells = columns
            .iter()
            .map(|column| {
                let text = object
                    .and_then(|o| o.get(*column))
                    .map(format_cell_value)
                    .unwrap_or_default();
                Cell::text(text)
            })
            .collect();
        sheet.push_row(Row::new(cells));
    }
    sheet.cap_rows(MAX_SHEET_ROWS);

    tracing::debug!(
        "Table sheet '{}': {} columns, {} rows",
        sheet_name,
        columns.len(),
        items.len()
    );
    sheet
}

/// Union of the keys of every object element, in first-seen order.
///
/// Non-object elements contribute nothing.
pub fn collect_columns(items: &[Value]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for object in items.iter().filter_map(Value::as_object) {
        for key in object.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }
    columns
}

/// Keep room for one marker column when `columns` overflows `max_columns`.
/// Returns how many columns were dropped.
fn cap_columns(columns: &mut Vec<&str>, max_columns: usize) -> usize {
    if columns.len() <= max_columns || max_columns == 0 {
        return 0;
    }
    let kept = max_columns - 1;
    let hidden = columns.len() - kept;
    columns.truncate(kept);
    hidden
}
