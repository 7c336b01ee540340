//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Form16Error, Result};

/// Main configuration for the form16 pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Form16Config {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Report and summary document configuration.
    pub report: ReportConfig,
}

/// Default bytes searched after each label.
pub const DEFAULT_SEARCH_WINDOW: usize = 4096;

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Bytes after each label searched for the field value
    /// (0 = [`DEFAULT_SEARCH_WINDOW`]).
    pub search_window: usize,

    /// Input longer than this is truncated before matching (0 = no limit).
    pub max_input_bytes: usize,

    /// Evaluate field rules on the rayon thread pool.
    pub parallel: bool,
}

impl ExtractionConfig {
    /// The search window in effect; the window is never unbounded.
    pub fn effective_search_window(&self) -> usize {
        effective_window(self.search_window)
    }
}

/// Map a configured window to the one applied, treating 0 as the default.
pub fn effective_window(bytes: usize) -> usize {
    if bytes == 0 { DEFAULT_SEARCH_WINDOW } else { bytes }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            search_window: DEFAULT_SEARCH_WINDOW,
            max_input_bytes: 4 * 1024 * 1024,
            parallel: false,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider PDF as text-based.
    pub min_text_length: usize,

    /// Maximum pages to linearize (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            max_pages: 0,
        }
    }
}

/// Report and summary document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title printed on the summary document.
    pub title: String,

    /// Append the first lines of the source text to the summary document.
    pub include_raw_sample: bool,

    /// Number of source lines in the raw sample.
    pub raw_sample_lines: usize,

    /// Footer note on every summary page.
    pub footer: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Form 16 - Detailed Analysis Report".to_string(),
            include_raw_sample: false,
            raw_sample_lines: 10,
            footer: "Note: This report is auto-generated. Verify values against the official Form 16 document."
                .to_string(),
        }
    }
}

impl Form16Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Form16Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Form16Config =
            serde_json::from_str(r#"{"extraction": {"parallel": true}}"#).unwrap();
        assert!(config.extraction.parallel);
        assert_eq!(config.extraction.search_window, 4096);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.report.raw_sample_lines, 10);
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Form16Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Form16Error::Config(_)));
    }

    #[test]
    fn test_save_then_load() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Form16Config::default();
        config.extraction.search_window = 1024;
        config.save(file.path()).unwrap();

        let loaded = Form16Config::from_file(file.path()).unwrap();
        assert_eq!(loaded.extraction.search_window, 1024);
    }

    #[test]
    fn test_zero_search_window_uses_default() {
        let config: Form16Config =
            serde_json::from_str(r#"{"extraction": {"search_window": 0}}"#).unwrap();
        assert_eq!(config.extraction.effective_search_window(), DEFAULT_SEARCH_WINDOW);
        assert_eq!(effective_window(512), 512);
    }
}
