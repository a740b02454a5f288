//! JSON → workbook projection
//!
//! Turns a `{ "key": ..., "value": { ... } }` document into a [`Workbook`]:
//! every object or array-of-objects under `value` becomes its own sheet.
//!
//! - Arrays become tables (one row per element, one column per key seen)
//! - Objects become Field | Value sheets with nested objects indented inline
//! - Everything else under `value` is dropped unless the scalars sheet is on
//!
//! Only a root that is neither an object nor a non-empty array is an error.
//! Anything wrong beneath a valid root degrades to placeholder rows.

mod field_tree;
mod format;
mod sheet_name;
mod table;

pub use field_tree::render_field_tree;
pub use format::{format_cell_value, is_primitive};
pub use sheet_name::{sanitize_sheet_name, SheetNamer, FALLBACK_SHEET_NAME, MAX_SHEET_NAME_LEN};
pub use table::{collect_columns, render_table};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{ConvertError, ConvertResult};
use crate::excel::ExcelExporter;
use crate::types::{
    Cell, CellStyle, ColumnSpec, Row, Sheet, SheetMode, Workbook, FIELD_COLUMN_WIDTH,
    MAX_SHEET_ROWS, VALUE_COLUMN_WIDTH,
};

/// Marker row for empty inputs
pub const NO_DATA: &str = "No data";

/// Marker row for arrays whose elements carry no object keys
pub const NO_OBJECT_FIELDS: &str = "No object fields to display";

/// Sheet used when the document has no usable `value` object
pub const EMPTY_SHEET_NAME: &str = "Empty";

/// Sheet collecting top-level values that are not sheets themselves
pub const SCALARS_SHEET_NAME: &str = "Scalars";

/// Title used when the document has no string `key`
pub const DEFAULT_TITLE: &str = "Export";

/// Default bound on field-tree nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs for a projection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Deepest object nesting a field-tree sheet may render
    pub max_depth: usize,
    /// Collect values that do not qualify for a sheet into a trailing "Scalars" sheet
    pub scalars_sheet: bool,
    /// Workbook title when the document does not name one
    pub default_title: String,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            scalars_sheet: false,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Builds workbooks from JSON documents.
///
/// Holds no state between calls; one value can serve any number of
/// conversions, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    options: ProjectionOptions,
}

impl Projector {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Convert JSON text into `.xlsx` bytes
    pub fn project(&self, json_bytes: &[u8]) -> ConvertResult<Vec<u8>> {
        let result = self
            .project_workbook(json_bytes)
            .and_then(|workbook| ExcelExporter::new(&workbook).to_buffer());
        if let Err(e) = &result {
            error!("JSON conversion error: {}", e);
        }
        result
    }

    /// Convert JSON text into the in-memory workbook model
    pub fn project_workbook(&self, json_bytes: &[u8]) -> ConvertResult<Workbook> {
        let value: Value = serde_json::from_slice(json_bytes)?;
        self.project_value(&value)
    }

    /// Project an already-parsed document.
    ///
    /// An array root contributes only its first element; later elements are ignored.
    pub fn project_value(&self, value: &Value) -> ConvertResult<Workbook> {
        match value {
            Value::Object(_) => self.process_root(value),
            Value::Array(items) => match items.first() {
                Some(first) => {
                    if items.len() > 1 {
                        debug!(
                            "Array root has {} elements; only the first is converted",
                            items.len()
                        );
                    }
                    self.process_root(first)
                }
                None => Err(ConvertError::Shape("Input JSON array is empty".to_string())),
            },
            _ => Err(ConvertError::Shape(
                "JSON must be an object or array of objects".to_string(),
            )),
        }
    }

    fn process_root(&self, root: &Value) -> ConvertResult<Workbook> {
        let title = match root.get("key") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => self.options.default_title.clone(),
        };
        info!("Creating workbook for key: {}", title);
        let mut workbook = Workbook::new(title);

        let Some(entries) = root.get("value").and_then(Value::as_object) else {
            warn!("Root has no valid \"value\" object; creating empty workbook");
            workbook.add_sheet(Sheet::placeholder(EMPTY_SHEET_NAME, NO_DATA));
            return Ok(workbook);
        };

        let mut namer = SheetNamer::new();
        let mut dropped: Vec<(&str, &Value)> = Vec::new();

        for (key, value) in entries {
            if !is_sheet_eligible(value) {
                debug!("Skipping '{}': not an object or array of objects", key);
                dropped.push((key.as_str(), value));
                continue;
            }

            let sheet_name = namer.claim(key);
            info!("Creating sheet for key: {}", sheet_name);

            let sheet = match value {
                Value::Array(items) => render_table(&sheet_name, items),
                Value::Object(object) => {
                    render_field_tree(&sheet_name, object, self.options.max_depth)?
                }
                _ => continue,
            };
            workbook.add_sheet(sheet);
        }

        if self.options.scalars_sheet && !dropped.is_empty() {
            let name = namer.claim(SCALARS_SHEET_NAME);
            workbook.add_sheet(scalars_sheet(&name, &dropped));
        }

        Ok(workbook)
    }
}

/// Whether a value under `value` gets a sheet of its own.
///
/// Objects always do. Arrays do when at least one element is an object or
/// an array; arrays of primitives, primitives and null never do.
pub fn is_sheet_eligible(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(|item| !is_primitive(item)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}

fn scalars_sheet(name: &str, dropped: &[(&str, &Value)]) -> Sheet {
    let mut sheet = Sheet::new(name, SheetMode::Scalars);
    sheet.set_columns(vec![
        ColumnSpec::new("Field", FIELD_COLUMN_WIDTH),
        ColumnSpec::new("Value", VALUE_COLUMN_WIDTH),
    ]);
    let style = CellStyle {
        wrap: true,
        ..CellStyle::default()
    };
    for (key, value) in dropped {
        sheet.push_row(Row::new(vec![
            Cell::styled(*key, style),
            Cell::styled(format_cell_value(value), style),
        ]));
    }
    sheet.cap_rows(MAX_SHEET_ROWS);
    sheet
}

/// Convert JSON text into `.xlsx` bytes with default options
pub fn project(json_bytes: &[u8]) -> ConvertResult<Vec<u8>> {
    Projector::default().project(json_bytes)
}

/// Convert JSON text into a workbook model with default options
pub fn project_workbook(json_bytes: &[u8]) -> ConvertResult<Workbook> {
    Projector::default().project_workbook(json_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn workbook(value: Value) -> Workbook {
        Projector::default().project_value(&value).unwrap()
    }

    #[test]
    fn test_eligibility() {
        assert!(is_sheet_eligible(&json!({})));
        assert!(is_sheet_eligible(&json!({"a": 1})));
        assert!(is_sheet_eligible(&json!([1, {"a": 1}])));
        assert!(is_sheet_eligible(&json!([[1, 2]])));
        assert!(!is_sheet_eligible(&json!([])));
        assert!(!is_sheet_eligible(&json!([1, "two", null])));
        assert!(!is_sheet_eligible(&json!(null)));
        assert!(!is_sheet_eligible(&json!("text")));
        assert!(!is_sheet_eligible(&json!(3.5)));
        assert!(!is_sheet_eligible(&json!(true)));
    }

    #[test]
    fn test_only_eligible_keys_become_sheets() {
        let wb = workbook(json!({
            "key": "T",
            "value": {"a": 1, "b": [1, 2], "c": null, "d": {"x": 1}}
        }));
        assert_eq!(wb.title, "T");
        assert_eq!(wb.sheet_names(), vec!["d"]);
    }

    #[test]
    fn test_sheet_order_follows_key_order() {
        let wb = workbook(json!({
            "key": "T",
            "value": {
                "zeta": {"a": 1},
                "alpha": [{"b": 2}],
                "skip": "me",
                "mid": {"c": 3}
            }
        }));
        assert_eq!(wb.sheet_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(wb.sheets[0].mode, SheetMode::FieldTree);
        assert_eq!(wb.sheets[1].mode, SheetMode::Table);
    }

    #[test]
    fn test_table_sheet() {
        let wb = workbook(json!({
            "key": "T",
            "value": {"items": [{"a": 1, "b": 2}, {"b": 3, "c": 4}]}
        }));
        let sheet = wb.sheet("items").unwrap();
        assert_eq!(
            sheet.row_texts(),
            vec![vec!["a", "b", "c"], vec!["1", "2", ""], vec!["", "3", "4"]]
        );
    }

    #[test]
    fn test_empty_array_is_not_a_sheet() {
        let wb = workbook(json!({"key": "T", "value": {"items": []}}));
        assert!(wb.sheets.is_empty());
    }

    #[test]
    fn test_missing_value_degrades_to_empty_sheet() {
        for root in [
            json!({"key": "T"}),
            json!({"key": "T", "value": null}),
            json!({"key": "T", "value": "text"}),
            json!({"key": "T", "value": [{"a": 1}]}),
        ] {
            let wb = workbook(root);
            assert_eq!(wb.sheet_names(), vec![EMPTY_SHEET_NAME]);
            assert_eq!(wb.sheets[0].row_texts(), vec![vec![NO_DATA]]);
        }
    }

    #[test]
    fn test_title_defaults() {
        assert_eq!(workbook(json!({"value": {}})).title, "Export");
        assert_eq!(workbook(json!({"key": 5, "value": {}})).title, "Export");
        assert_eq!(workbook(json!({"key": "", "value": {}})).title, "Export");
        assert_eq!(workbook(json!({"key": "Acme", "value": {}})).title, "Acme");

        let projector = Projector::new(ProjectionOptions {
            default_title: "Report".to_string(),
            ..ProjectionOptions::default()
        });
        let wb = projector.project_value(&json!({"value": {}})).unwrap();
        assert_eq!(wb.title, "Report");
    }

    #[test]
    fn test_array_root_uses_first_element() {
        let wb = workbook(json!([
            {"key": "first", "value": {"a": {"x": 1}}},
            {"key": "second", "value": {"b": {"y": 2}}}
        ]));
        assert_eq!(wb.title, "first");
        assert_eq!(wb.sheet_names(), vec!["a"]);
    }

    #[test]
    fn test_array_root_with_primitive_first_element_degrades() {
        let wb = workbook(json!([42]));
        assert_eq!(wb.title, "Export");
        assert_eq!(wb.sheet_names(), vec![EMPTY_SHEET_NAME]);
    }

    #[test]
    fn test_shape_errors() {
        let projector = Projector::default();
        for root in [json!(42), json!("s"), json!(null), json!(true), json!([])] {
            let err = projector.project_value(&root).unwrap_err();
            assert!(matches!(err, ConvertError::Shape(_)), "root {}", root);
            assert!(err.to_string().starts_with("Failed to convert JSON"));
        }
    }

    #[test]
    fn test_parse_error() {
        let err = project_workbook(b"{not json").unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = project_workbook(b"{\"key\": \"\xff\xfe\"}").unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }

    #[test]
    fn test_sheet_names_sanitized_and_deduplicated() {
        let wb = workbook(json!({
            "key": "T",
            "value": {"a/b*c": {"x": 1}, "a?b*c": {"y": 2}, "///": {"z": 3}}
        }));
        assert_eq!(wb.sheet_names(), vec!["a_b_c", "a_b_c (2)", "Sheet"]);
    }

    #[test]
    fn test_scalars_sheet_option() {
        let projector = Projector::new(ProjectionOptions {
            scalars_sheet: true,
            ..ProjectionOptions::default()
        });
        let wb = projector
            .project_value(&json!({
                "key": "T",
                "value": {"name": "Acme", "profile": {"x": 1}, "tags": ["a", "b"], "gone": null}
            }))
            .unwrap();

        assert_eq!(wb.sheet_names(), vec!["profile", "Scalars"]);
        let scalars = wb.sheet("Scalars").unwrap();
        assert_eq!(scalars.mode, SheetMode::Scalars);
        assert_eq!(
            scalars.row_texts(),
            vec![
                vec!["Field", "Value"],
                vec!["name", "Acme"],
                vec!["tags", "a, b"],
                vec!["gone", ""],
            ]
        );
    }

    #[test]
    fn test_scalars_sheet_omitted_when_nothing_dropped() {
        let projector = Projector::new(ProjectionOptions {
            scalars_sheet: true,
            ..ProjectionOptions::default()
        });
        let wb = projector
            .project_value(&json!({"value": {"profile": {"x": 1}}}))
            .unwrap();
        assert_eq!(wb.sheet_names(), vec!["profile"]);
    }

    #[test]
    fn test_depth_limit_surfaces_as_shape_error() {
        let projector = Projector::new(ProjectionOptions {
            max_depth: 1,
            ..ProjectionOptions::default()
        });
        let err = projector
            .project_value(&json!({"value": {"p": {"a": {"b": {"c": 1}}}}}))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Shape(_)));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let input = br#"{"key":"T","value":{"p":{"n":1,"o":{"q":[1,2]}},"t":[{"a":1},{"b":2}]}}"#;
        let first = project_workbook(input).unwrap();
        let second = project_workbook(input).unwrap();
        assert_eq!(first, second);
    }
}
