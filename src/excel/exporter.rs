//! Excel exporter implementation

use crate::error::ConvertResult;
use crate::types::{Cell, CellStyle, Sheet, Workbook, MAX_CELL_TEXT_LEN};
use rust_xlsxwriter::{
    Color, DocProperties, Format, FormatAlign, FormatPattern, Workbook as XlsxWorkbook, Worksheet,
};
use std::path::Path;

/// Author recorded in the document properties
pub const AUTHOR: &str = "jsonsheet JSON → Excel Converter";

/// Writes a [`Workbook`] model as an `.xlsx` file
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Serialize to an in-memory `.xlsx` buffer
    pub fn to_buffer(&self) -> ConvertResult<Vec<u8>> {
        let mut xlsx = self.build()?;
        Ok(xlsx.save_to_buffer()?)
    }

    /// Serialize to a file on disk
    pub fn export(&self, output_path: &Path) -> ConvertResult<()> {
        let mut xlsx = self.build()?;
        xlsx.save(output_path)?;
        Ok(())
    }

    fn build(&self) -> ConvertResult<XlsxWorkbook> {
        let mut xlsx = XlsxWorkbook::new();

        let properties = DocProperties::new()
            .set_title(&self.workbook.title)
            .set_author(AUTHOR);
        xlsx.set_properties(&properties);

        for sheet in &self.workbook.sheets {
            let worksheet = xlsx.add_worksheet();
            Self::export_sheet(worksheet, sheet)?;
        }

        Ok(xlsx)
    }

    fn export_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> ConvertResult<()> {
        worksheet.set_name(&sheet.name)?;

        for (col_idx, column) in sheet.columns.iter().enumerate() {
            worksheet.set_column_width(col_idx as u16, column.width)?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.cells.iter().enumerate() {
                Self::write_cell(worksheet, row_idx as u32, col_idx as u16, cell)?;
            }
        }

        Ok(())
    }

    /// Write one cell. Empty unstyled cells are left out entirely; empty
    /// styled cells are written blank so fills and alignment still show.
    fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> ConvertResult<()> {
        let text = fit_cell_text(&cell.text);
        if text.len() < cell.text.len() {
            tracing::warn!(
                "Cell ({}, {}) on '{}' exceeds {} characters; text truncated",
                row,
                col,
                worksheet.name(),
                MAX_CELL_TEXT_LEN
            );
        }

        if cell.style.is_plain() {
            if !text.is_empty() {
                worksheet.write_string(row, col, text)?;
            }
            return Ok(());
        }

        let format = cell_format(&cell.style);
        if text.is_empty() {
            worksheet.write_blank(row, col, &format)?;
        } else {
            worksheet.write_string_with_format(row, col, text, &format)?;
        }
        Ok(())
    }
}

/// Longest prefix of `text` that fits in one Excel cell
pub fn fit_cell_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_TEXT_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Translate a model style into a worksheet format
pub fn cell_format(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if let Some(rgb) = style.background {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(rgb));
    }
    if style.wrap || style.indent > 0 {
        format = format.set_align(FormatAlign::Top);
    }
    if style.indent > 0 {
        format = format.set_indent(style.indent);
    }
    if style.wrap {
        format = format.set_text_wrap();
    }
    format
}
