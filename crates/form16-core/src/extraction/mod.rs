//! Form 16 field extraction module.

mod engine;
pub mod rules;

pub use engine::{clean_value, DetailedExtraction, FieldEngine, FieldMatch};

use crate::models::form16::ExtractionResult;

/// Trait for Form 16 field extractors.
///
/// Extraction is total: every canonical field is present in the result,
/// missing ones carry the `"Not Found"` sentinel.
pub trait Form16Extractor {
    /// Extract all fields from linearized document text.
    fn extract(&self, text: &str) -> ExtractionResult;
}

/// Extract fields with the built-in rules and default limits.
pub fn extract(text: &str) -> ExtractionResult {
    FieldEngine::new().extract(text)
}
