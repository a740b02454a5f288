use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Conversion failures.
///
/// Only structurally wrong input fails; everything beneath a valid root
/// degrades to placeholder rows instead of producing one of these.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to convert JSON: invalid JSON text: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to convert JSON: {0}")]
    Shape(String),

    #[error("Failed to convert JSON: could not write workbook: {0}")]
    Export(String),

    #[error("Failed to convert JSON: IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// True for errors caused by the caller's input rather than by the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ConvertError::Parse(_) | ConvertError::Shape(_))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ConvertError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ConvertError::Export(err.to_string())
    }
}

impl From<calamine::XlsxError> for ConvertError {
    fn from(err: calamine::XlsxError) -> Self {
        ConvertError::Export(err.to_string())
    }
}
