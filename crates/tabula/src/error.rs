//! Document-level error types

use thiserror::Error;

/// Result type for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Errors surfaced by an editing session
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be classified as CSV, TSV, or XLSX
    #[error("Unsupported format: {file_name} ({mime})", mime = .mime.as_deref().unwrap_or("no MIME type"))]
    UnsupportedFormat {
        /// Declared MIME type, if any
        mime: Option<String>,
        /// File name used for extension sniffing
        file_name: String,
    },

    /// Workbook codec error
    #[error("Workbook error: {0}")]
    Xlsx(#[from] tabula_xlsx::XlsxError),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tabula_core::Error),
}
