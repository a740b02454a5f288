//! jsonsheet - JSON documents to multi-sheet Excel workbooks
//!
//! This library projects an arbitrary JSON document onto a spreadsheet:
//! nested objects and arrays of objects under the document's `value` key each
//! become a worksheet, rendered either as a table or as an indented
//! Field | Value tree.
//!
//! # Features
//!
//! - Deterministic JSON → workbook projection (sheet order follows key order)
//! - Tables built from the union of all object keys, in first-seen order
//! - Nested objects rendered inline as bold, indented sections
//! - `.xlsx` export via `rust_xlsxwriter`, read-back via `calamine`
//! - CLI and HTTP upload front ends
//!
//! # Example
//!
//! ```no_run
//! use jsonsheet::projector::Projector;
//! use jsonsheet::excel::ExcelExporter;
//! use std::path::Path;
//!
//! let json = br#"{"key": "Acme", "value": {"staff": [{"name": "Ann"}]}}"#;
//! let workbook = Projector::default().project_workbook(json)?;
//!
//! println!("Sheets: {:?}", workbook.sheet_names());
//!
//! ExcelExporter::new(&workbook).export(Path::new("acme.xlsx"))?;
//! # Ok::<(), jsonsheet::error::ConvertError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod projector;
pub mod types;

// Re-export commonly used types
pub use error::{ConvertError, ConvertResult};
pub use projector::{project, project_workbook, ProjectionOptions, Projector};
pub use types::{Cell, CellStyle, Row, Sheet, SheetMode, Workbook};
