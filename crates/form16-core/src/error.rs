//! Error types for the form16-core library.
//!
//! Field extraction itself never fails: a missing field is reported as the
//! `"Not Found"` sentinel. Errors only come from I/O, PDF handling and from
//! compiling user-supplied rule tables.

use thiserror::Error;

/// Main error type for the form16 library.
#[derive(Error, Debug)]
pub enum Form16Error {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Rule table error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Failed to build or write a generated PDF.
    #[error("failed to write PDF: {0}")]
    Build(String),
}

/// Errors raised while compiling a field rule table.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A label or value pattern is not a valid regular expression.
    #[error("invalid pattern for {field}: {reason}")]
    Pattern { field: String, reason: String },

    /// The value group does not exist in the value pattern.
    #[error("value group {group} out of range for {field} ({available} groups)")]
    Group {
        field: String,
        group: usize,
        available: usize,
    },
}

/// Result type for the form16 library.
pub type Result<T> = std::result::Result<T, Form16Error>;
