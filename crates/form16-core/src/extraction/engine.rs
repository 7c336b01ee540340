//! Rule-driven field extraction engine.

use std::sync::Arc;
use std::time::Instant;

use lazy_static::lazy_static;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::models::config::{effective_window, ExtractionConfig};
use crate::models::form16::{ExtractionResult, Field};

use super::rules::{default_rules, CompiledRule, FieldRules, RuleSet};
use super::Form16Extractor;

lazy_static! {
    static ref DEFAULT_RULESET: Arc<RuleSet> =
        Arc::new(RuleSet::compile(&default_rules()).expect("built-in Form 16 rules must compile"));
}

/// Where a field value was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Field the value belongs to.
    pub field: Field,
    /// Cleaned value.
    pub value: String,
    /// Byte span of the label in the (possibly truncated) input.
    pub label_span: (usize, usize),
    /// Byte span of the raw captured value.
    pub value_span: (usize, usize),
}

/// Extraction result together with match positions and timing.
#[derive(Debug, Clone)]
pub struct DetailedExtraction {
    /// The fixed-key result.
    pub result: ExtractionResult,
    /// One entry per found field, in canonical order.
    pub matches: Vec<FieldMatch>,
    /// Whether the input was cut to `max_input_bytes`.
    pub truncated: bool,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Applies a compiled [`RuleSet`] to linearized Form 16 text.
///
/// Matching is linear in the input: labels are found with a single pass
/// of the regex engine and each value search is limited to
/// `search_window` bytes after its label.
#[derive(Debug, Clone)]
pub struct FieldEngine {
    rules: Arc<RuleSet>,
    search_window: usize,
    max_input_bytes: usize,
    parallel: bool,
}

impl FieldEngine {
    /// Create an engine with the built-in rules and default limits.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an engine with the built-in rules and the given limits.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            rules: DEFAULT_RULESET.clone(),
            search_window: config.effective_search_window(),
            max_input_bytes: config.max_input_bytes,
            parallel: config.parallel,
        }
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Set the value search window in bytes (0 = the default window).
    pub fn with_search_window(mut self, bytes: usize) -> Self {
        self.search_window = effective_window(bytes);
        self
    }

    /// Set the input size limit in bytes (0 = unlimited).
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Evaluate fields on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Extract all fields and keep match positions.
    pub fn extract_detailed(&self, text: &str) -> DetailedExtraction {
        let start = Instant::now();
        let (text, truncated) = truncate_input(text, self.max_input_bytes);

        if truncated {
            debug!("Input truncated to {} bytes", text.len());
        }

        info!("Extracting Form 16 fields from {} bytes of text", text.len());

        let found: Vec<Option<FieldMatch>> = if self.parallel {
            self.rules
                .fields()
                .par_iter()
                .map(|entry| self.match_field(entry, text))
                .collect()
        } else {
            self.rules
                .fields()
                .iter()
                .map(|entry| self.match_field(entry, text))
                .collect()
        };

        let mut result = ExtractionResult::new();
        let matches: Vec<FieldMatch> = found.into_iter().flatten().collect();
        for m in &matches {
            result.insert(m.field, m.value.clone());
        }

        if !result.looks_like_form16() {
            warn!("No Form 16 fields found; the input may not be a Form 16 certificate");
        } else {
            debug!("Found {}/{} fields", result.found_count(), Field::ALL.len());
        }

        DetailedExtraction {
            result,
            matches,
            truncated,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn match_field(&self, entry: &FieldRules, text: &str) -> Option<FieldMatch> {
        let found = entry
            .rules
            .iter()
            .find_map(|rule| self.apply_rule(rule, text));

        match &found {
            Some(m) => debug!("{}: '{}' at {:?}", entry.field, m.value, m.value_span),
            None => debug!("{}: not found", entry.field),
        }

        found
    }

    /// First label occurrence whose window contains a value wins. A value
    /// that cleans to nothing ends the rule without trying later labels.
    fn apply_rule(&self, rule: &CompiledRule, text: &str) -> Option<FieldMatch> {
        for label in rule.label.find_iter(text) {
            let from = label.end();
            let to = window_end(text, from, self.search_window);

            let Some(caps) = rule.value.captures(&text[from..to]) else {
                trace!("{}: label at {} has no value in window", rule.field, label.start());
                continue;
            };

            let raw = caps.get(rule.group)?;
            let value = clean_value(raw.as_str());
            if value.is_empty() {
                debug!("{}: matched value at {} is empty after cleaning", rule.field, from + raw.start());
                return None;
            }

            return Some(FieldMatch {
                field: rule.field,
                value: value.to_string(),
                label_span: (label.start(), label.end()),
                value_span: (from + raw.start(), from + raw.end()),
            });
        }

        None
    }
}

impl Default for FieldEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Form16Extractor for FieldEngine {
    fn extract(&self, text: &str) -> ExtractionResult {
        self.extract_detailed(text).result
    }
}

/// Clean a captured value: trim, drop leading punctuation, trim again.
pub fn clean_value(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
}

/// End of the value search window starting at `from`.
///
/// Snaps to a char boundary and never splits a trailing amount.
fn window_end(text: &str, from: usize, window: usize) -> usize {
    let bytes = text.as_bytes();
    let mut end = from.saturating_add(window).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    while end < bytes.len() && matches!(bytes[end], b'0'..=b'9' | b',' | b'.') {
        end += 1;
    }

    end
}

/// Cut the input to at most `max` bytes on a char boundary.
fn truncate_input(text: &str, max: usize) -> (&str, bool) {
    if max == 0 || text.len() <= max {
        return (text, false);
    }

    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    (&text[..end], true)
}
