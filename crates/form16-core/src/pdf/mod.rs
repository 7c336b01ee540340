//! PDF processing module: text linearization for the extraction engine and
//! the summary document writer.

mod extractor;
mod writer;

pub use extractor::{PdfContent, PdfExtractor, PdfPage};
pub use writer::{render_summary_pdf, SummaryOptions};

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Has pages but too little text (likely a scan).
    Scanned,
    /// No text at all.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Linearized text of the whole document.
    fn extract_text(&self) -> Result<String>;

    /// Raw text of a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Flatten page texts into the single string the extraction engine reads.
///
/// Each page's non-empty lines are trimmed and joined with one space, and
/// every page is terminated by a newline.
pub fn linearize_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();

    for page in pages {
        let fragments: Vec<&str> = page
            .as_ref()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        text.push_str(&fragments.join(" "));
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_linearize_pages() {
        let pages = ["  Gross Salary \n\n 1,000.00\n", "Cess\n20.00"];
        assert_eq!(linearize_pages(pages), "Gross Salary 1,000.00\nCess 20.00\n");
    }

    #[test]
    fn test_linearize_blank_pages_keep_separator() {
        assert_eq!(linearize_pages(["", "   "]), "\n\n");
        assert_eq!(linearize_pages(Vec::<String>::new()), "");
    }
}
