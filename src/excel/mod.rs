//! Excel export/import module
//!
//! - Export: workbook model → Excel (.xlsx) with header and section styling
//! - Import: Excel (.xlsx) → text-only workbook model, for inspection

mod exporter;
mod importer;

pub use exporter::{cell_format, fit_cell_text, ExcelExporter, AUTHOR};
pub use importer::ExcelImporter;
