//! Render errors.

use thiserror::Error;

/// Failure to produce a document file.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The PDF library rejected the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
