//! Excel importer implementation - Excel (.xlsx) → text-only workbook model
//!
//! Used to inspect converted files and to verify what a conversion wrote.
//! Styles are not read back.

use crate::error::ConvertResult;
use crate::types::{Row, Sheet, SheetMode, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Reads `.xlsx` files back into a [`Workbook`]
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the file; the title is the file stem
    pub fn import(&self) -> ConvertResult<Workbook> {
        let xlsx: Xlsx<_> = open_workbook(&self.path)?;
        let title = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        read_workbook(xlsx, title)
    }

    /// Import from an in-memory buffer
    pub fn from_bytes(bytes: Vec<u8>) -> ConvertResult<Workbook> {
        let xlsx = Xlsx::new(Cursor::new(bytes))?;
        read_workbook(xlsx, String::new())
    }
}

fn read_workbook<RS: Read + Seek>(mut xlsx: Xlsx<RS>, title: String) -> ConvertResult<Workbook> {
    let mut workbook = Workbook::new(title);
    let sheet_names = xlsx.sheet_names().to_vec();

    for sheet_name in sheet_names {
        let range = xlsx.worksheet_range(&sheet_name)?;
        workbook.add_sheet(read_sheet(&sheet_name, &range));
    }

    Ok(workbook)
}

/// Copy a range into a sheet, padding so cell (0, 0) is A1
fn read_sheet(sheet_name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(sheet_name, SheetMode::Imported);
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    for _ in 0..start_row {
        sheet.push_row(Row::default());
    }
    for cells in range.rows() {
        let texts = std::iter::repeat(String::new())
            .take(start_col as usize)
            .chain(cells.iter().map(cell_text));
        sheet.push_row(Row::from_texts(texts));
    }
    sheet
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
