use thiserror::Error;

/// Errors that can occur around a cost projection: loading inputs,
/// validating them, and exporting results.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid display window: {0}")]
    InvalidWindow(String),
}

impl From<rust_xlsxwriter::XlsxError> for ProjectionError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ProjectionError::Excel(e.to_string())
    }
}
