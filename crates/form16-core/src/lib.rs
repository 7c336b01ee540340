//! Core library for Form 16 (Indian salary TDS certificate) processing.
//!
//! This crate provides:
//! - PDF text linearization (one flat string per document)
//! - Rule-based field extraction (names, PAN/TAN, assessment year, amounts)
//! - Report model grouping the fields into sections
//! - Summary PDF generation

pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;
pub mod report;

pub use error::{ExtractionError, Form16Error, PdfError, Result};
pub use extraction::rules::{default_rules, FieldRule, RuleSet};
pub use extraction::{extract, DetailedExtraction, FieldEngine, FieldMatch, Form16Extractor};
pub use models::config::Form16Config;
pub use models::form16::{ExtractionResult, Field, NOT_FOUND};
pub use pdf::{linearize_pages, render_summary_pdf, PdfContent, PdfExtractor, PdfProcessor, PdfType, SummaryOptions};
pub use report::{Report, ReportRow, ReportSection, SECTIONS};
