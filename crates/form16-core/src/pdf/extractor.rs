//! PDF text extraction using lopdf, with pdf-extract as a fallback.

use lopdf::Document;
use tracing::{debug, warn};

use super::{linearize_pages, PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    max_pages: usize,
    min_text_length: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Linearized text of all processed pages.
    pub text: String,
    /// Pages with their raw text.
    pub pages: Vec<PdfPage>,
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: 0,
            min_text_length: 50,
        }
    }

    /// Limit the number of pages read (0 = all).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Minimum text length for a PDF to count as text-based.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Extract page texts and the linearized document text.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_numbers = self.page_numbers()?;

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            let text = match self.extract_page_text(number) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", number, e);
                    String::new()
                }
            };
            pages.push(PdfPage { number, text });
        }

        let text = if pages.iter().all(|p| p.text.trim().is_empty()) {
            debug!("lopdf found no page text, falling back to pdf-extract");
            self.fallback_text()?
        } else {
            linearize_pages(pages.iter().map(|p| p.text.as_str()))
        };

        let pdf_type = self.classify(&text);
        debug!(
            "PDF analysis: {} pages, {} chars text -> {:?}",
            pages.len(),
            text.len(),
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            pages,
        })
    }

    /// Page numbers to process, honoring `max_pages`.
    fn page_numbers(&self) -> Result<Vec<u32>> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        let mut numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if numbers.is_empty() {
            return Err(PdfError::NoPages);
        }
        if self.max_pages > 0 {
            numbers.truncate(self.max_pages);
        }

        Ok(numbers)
    }

    /// Whole-document extraction through pdf-extract; pages are split on
    /// form feeds.
    fn fallback_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let mut pages: Vec<&str> = text.split('\u{c}').collect();
        if self.max_pages > 0 {
            pages.truncate(self.max_pages);
        }

        Ok(linearize_pages(pages))
    }

    fn classify(&self, text: &str) -> PdfType {
        let len = text.trim().len();
        if len == 0 {
            PdfType::Empty
        } else if len < self.min_text_length {
            PdfType::Scanned
        } else {
            PdfType::Text
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        self.classify(&text)
    }

    fn extract_text(&self) -> Result<String> {
        self.extract_all().map(|content| content.text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
