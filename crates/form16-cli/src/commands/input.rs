//! Reading certificate text from PDF or plain text files.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use form16_core::models::config::Form16Config;
use form16_core::pdf::{PdfExtractor, PdfProcessor, PdfType};

/// Linearized text of one input file.
pub struct SourceText {
    pub text: String,
    pub pages: usize,
}

/// Lowercased file extension, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether a file can be fed to the extractor.
pub fn is_supported(path: &Path) -> bool {
    matches!(extension(path).as_str(), "pdf" | "txt")
}

/// Read and linearize a `.pdf` or `.txt` file.
pub fn read_source(path: &Path, config: &Form16Config) -> anyhow::Result<SourceText> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    match extension(path).as_str() {
        "pdf" => read_pdf(path, config),
        "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(SourceText { text, pages: 1 })
        }
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

fn read_pdf(path: &Path, config: &Form16Config) -> anyhow::Result<SourceText> {
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new()
        .with_max_pages(config.pdf.max_pages)
        .with_min_text_length(config.pdf.min_text_length);
    extractor.load(&data)?;

    let content = extractor.extract_all()?;
    debug!(
        "{}: {} pages, type {:?}",
        path.display(),
        extractor.page_count(),
        content.pdf_type
    );

    match content.pdf_type {
        PdfType::Empty => anyhow::bail!(
            "No text could be extracted from {} (scanned PDFs are not supported)",
            path.display()
        ),
        PdfType::Scanned => warn!(
            "{} has very little embedded text; it may be a scanned document",
            path.display()
        ),
        PdfType::Text => {}
    }

    Ok(SourceText {
        text: content.text,
        pages: content.pages.len(),
    })
}
