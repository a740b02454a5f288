//==============================================================================
// Workbook Model
//==============================================================================

/// Fill behind header rows (light gray)
pub const HEADER_FILL: u32 = 0xD3D3D3;

/// Fill behind nested-object section rows in field-tree sheets
pub const SECTION_FILL: u32 = 0xEEEEEE;

/// Column width of every table column
pub const TABLE_COLUMN_WIDTH: f64 = 20.0;

/// Width of the "Field" column in field-tree sheets
pub const FIELD_COLUMN_WIDTH: f64 = 32.0;

/// Width of the "Value" column in field-tree sheets
pub const VALUE_COLUMN_WIDTH: f64 = 64.0;

/// Most characters Excel stores in one cell
pub const MAX_CELL_TEXT_LEN: usize = 32_767;

/// Rows per worksheet, header included
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Columns per worksheet
pub const MAX_SHEET_COLUMNS: usize = 16_384;

/// In-memory workbook produced by the projector.
///
/// Sheets are kept in insertion order, which is the order the source keys
/// were encountered in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub title: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sheets: Vec::new(),
        }
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Find a sheet by exact name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// How a sheet's rows were laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMode {
    /// Array of objects rendered under a union-of-keys header
    Table,
    /// Nested object rendered as indented Field | Value rows
    FieldTree,
    /// Single marker row ("No data" and friends)
    Placeholder,
    /// Top-level values that did not qualify for their own sheet
    Scalars,
    /// Read back from an existing file; layout unknown
    Imported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub header: String,
    pub width: f64,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub mode: SheetMode,
    /// Column definitions; empty for placeholder sheets
    pub columns: Vec<ColumnSpec>,
    /// All rows, header row included
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, mode: SheetMode) -> Self {
        Self {
            name: name.into(),
            mode,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Sheet holding a single unstyled marker row
    pub fn placeholder(name: impl Into<String>, message: &str) -> Self {
        let mut sheet = Self::new(name, SheetMode::Placeholder);
        sheet.push_row(Row::from_texts([message]));
        sheet
    }

    /// Set the columns and emit the bold, gray-filled header row for them
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) {
        let style = CellStyle::header();
        let header = Row::new(
            columns
                .iter()
                .map(|c| Cell::styled(c.header.clone(), style))
                .collect(),
        );
        self.columns = columns;
        self.rows.push(header);
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Plain text of every row, header included
    pub fn row_texts(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(Row::texts).collect()
    }

    /// Rows after the header (for sheets that have columns)
    pub fn data_rows(&self) -> &[Row] {
        if self.columns.is_empty() {
            &self.rows
        } else {
            &self.rows[1.min(self.rows.len())..]
        }
    }

    /// Keep at most `max_rows` rows, the last of them a marker counting the
    /// rows left out. Returns how many rows were left out.
    pub fn cap_rows(&mut self, max_rows: usize) -> usize {
        if self.rows.len() <= max_rows || max_rows == 0 {
            return 0;
        }
        let kept = max_rows - 1;
        let hidden = self.rows.len() - kept;
        self.rows.truncate(kept);
        let marker = format!("[{} more row(s) not shown]", hidden);
        self.rows.push(Row::from_texts([marker]));
        tracing::warn!(
            "Sheet '{}' exceeds {} rows; {} row(s) left out",
            self.name,
            max_rows,
            hidden
        );
        hidden
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(Cell::text).collect())
    }

    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.text.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Presentation attributes the serializer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    /// Solid fill as 0xRRGGBB
    pub background: Option<u32>,
    pub indent: u8,
    pub wrap: bool,
}

impl CellStyle {
    pub fn header() -> Self {
        Self {
            bold: true,
            background: Some(HEADER_FILL),
            ..Self::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_columns_emits_header_row() {
        let mut sheet = Sheet::new("items", SheetMode::Table);
        sheet.set_columns(vec![
            ColumnSpec::new("a", TABLE_COLUMN_WIDTH),
            ColumnSpec::new("b", TABLE_COLUMN_WIDTH),
        ]);

        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].texts(), vec!["a", "b"]);
        assert!(sheet.rows[0].cells.iter().all(|c| c.style.bold));
        assert_eq!(sheet.rows[0].cells[0].style.background, Some(HEADER_FILL));
        assert!(sheet.data_rows().is_empty());
    }

    #[test]
    fn test_placeholder_sheet() {
        let sheet = Sheet::placeholder("Empty", "No data");
        assert_eq!(sheet.mode, SheetMode::Placeholder);
        assert_eq!(sheet.row_texts(), vec![vec!["No data".to_string()]]);
        assert!(sheet.rows[0].cells[0].style.is_plain());
        assert_eq!(sheet.data_rows().len(), 1);
    }

    #[test]
    fn test_cap_rows_appends_marker() {
        let mut sheet = Sheet::new("items", SheetMode::Table);
        sheet.set_columns(vec![ColumnSpec::new("n", TABLE_COLUMN_WIDTH)]);
        for n in 0..10 {
            sheet.push_row(Row::from_texts([n.to_string()]));
        }

        assert_eq!(sheet.cap_rows(5), 7);
        assert_eq!(sheet.rows.len(), 5);
        assert_eq!(sheet.rows[3].texts(), vec!["2"]);
        assert_eq!(sheet.rows[4].texts(), vec!["[7 more row(s) not shown]"]);
    }

    #[test]
    fn test_cap_rows_within_limit_is_untouched() {
        let mut sheet = Sheet::placeholder("Empty", "No data");
        assert_eq!(sheet.cap_rows(MAX_SHEET_ROWS), 0);
        assert_eq!(sheet.row_texts(), vec![vec!["No data".to_string()]]);
    }

    #[test]
    fn test_workbook_lookup() {
        let mut wb = Workbook::new("T");
        wb.add_sheet(Sheet::new("one", SheetMode::Table));
        wb.add_sheet(Sheet::new("two", SheetMode::FieldTree));

        assert_eq!(wb.sheet_names(), vec!["one", "two"]);
        assert_eq!(wb.sheet("two").map(|s| s.mode), Some(SheetMode::FieldTree));
        assert!(wb.sheet("three").is_none());
    }
}
