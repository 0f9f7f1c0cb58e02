// ==========================================
// Bulk Label Importer - Import Error Types
// ==========================================
// thiserror derive; fatal parse errors only — row-level validation
// problems travel inside MappedOrderItem.errors instead.
// ==========================================

use thiserror::Error;

/// Errors raised while turning an uploaded file into raw rows.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Fixed user-facing wording; the offending extension is kept for logs.
    #[error("Unsupported file format. Please upload CSV, XLS, or XLSX files.")]
    UnsupportedFormat { extension: String },

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Failed to parse spreadsheet: {0}")]
    ExcelParse(String),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(String),

    /// Zero usable rows remained after dropping blank lines.
    #[error("No data rows found in file.")]
    NoData,

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParse(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParse(err.to_string())
    }
}

/// Result alias for the import layer.
pub type ImportResult<T> = Result<T, ImportError>;
