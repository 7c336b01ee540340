//! Report model: extracted fields grouped into titled sections.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::form16::{json_value_text, ExtractionResult, Field, NOT_FOUND};

/// Title of the section holding keys outside the canonical field set.
pub const ADDITIONAL_FIELDS: &str = "Additional Fields";

/// A fixed report section and the fields it lists, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSection {
    pub title: &'static str,
    pub fields: &'static [Field],
}

/// Report sections in display order.
pub const SECTIONS: [ReportSection; 3] = [
    ReportSection {
        title: "Personal & Employer Information",
        fields: &[
            Field::EmployeeName,
            Field::EmployeePan,
            Field::EmployerName,
            Field::EmployerPan,
            Field::Tan,
            Field::AssessmentYear,
        ],
    },
    ReportSection {
        title: "Income & Deductions",
        fields: &[
            Field::GrossSalary,
            Field::StandardDeduction,
            Field::ProfessionalTax,
            Field::IncomeChargeable,
            Field::TotalDeductionsVia,
        ],
    },
    ReportSection {
        title: "Tax Calculation",
        fields: &[
            Field::TotalTaxableIncome,
            Field::TaxOnTotalIncome,
            Field::Cess,
            Field::TotalTds,
        ],
    },
];

/// One label/value line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub key: String,
    pub value: String,
}

/// A section with its rows filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// A rendered report, ready for text, CSV or PDF output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sections: Vec<RenderedSection>,
}

impl Report {
    /// Build the fixed sections from an extraction result.
    pub fn from_result(result: &ExtractionResult) -> Self {
        let sections = SECTIONS
            .iter()
            .map(|section| RenderedSection {
                title: section.title.to_string(),
                rows: section
                    .fields
                    .iter()
                    .map(|&field| field_row(field, result.get(field)))
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    /// Build a report from an arbitrary JSON mapping.
    ///
    /// Canonical keys fill the fixed sections (absent or `null` shows as
    /// not found); any other key becomes a row under "Additional Fields",
    /// in mapping order.
    pub fn from_mapping(map: &Map<String, Value>) -> Self {
        let mut report = Self::from_result(&ExtractionResult::from_mapping(map));

        let extras: Vec<ReportRow> = map
            .iter()
            .filter(|(key, _)| Field::from_key(key).is_none())
            .map(|(key, value)| ReportRow {
                label: key.clone(),
                key: key.clone(),
                value: json_value_text(value).unwrap_or_else(|| NOT_FOUND.to_string()),
            })
            .collect();

        if !extras.is_empty() {
            report.sections.push(RenderedSection {
                title: ADDITIONAL_FIELDS.to_string(),
                rows: extras,
            });
        }

        report
    }

    /// All rows, section by section.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> + '_ {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    /// Plain text rendering: a header per section, then `label: value` rows.
    pub fn render_text(&self) -> String {
        let width = self.rows().map(|r| r.label.len()).max().unwrap_or(0);
        let mut out = String::new();

        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", section.title);
            let _ = writeln!(out, "{}", "-".repeat(section.title.len()));
            for row in &section.rows {
                let _ = writeln!(out, "  {:<width$}  {}", format!("{}:", row.label), row.value, width = width + 1);
            }
        }

        out
    }
}

fn field_row(field: Field, value: &str) -> ReportRow {
    ReportRow {
        label: field.label().to_string(),
        key: field.key().to_string(),
        value: value.to_string(),
    }
}
