//! Declarative field rules for Form 16 certificates.
//!
//! A rule pairs a label pattern with a value pattern. The engine searches
//! the value pattern in a bounded window right after each label occurrence;
//! value patterns decide themselves whether the value must follow the label
//! immediately (`^`-anchored) or may appear anywhere in the window.

pub mod amounts;
pub mod identifiers;
pub mod patterns;

pub use amounts::{format_indian_amount, parse_amount};
pub use identifiers::{pan_holder, validate_assessment_year, validate_pan, validate_tan, PanHolder};
pub use patterns::*;

use regex::{Regex, RegexBuilder};

use crate::error::ExtractionError;
use crate::models::form16::Field;

/// Uncompiled rule: which field, where its label is, what its value looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Field this rule fills.
    pub field: Field,
    /// Pattern locating the label.
    pub label: String,
    /// Pattern locating the value in the window after the label.
    pub value: String,
    /// Capture group of `value` holding the field value.
    pub group: usize,
}

impl FieldRule {
    pub fn new(field: Field, label: impl Into<String>, value: impl Into<String>, group: usize) -> Self {
        Self {
            field,
            label: label.into(),
            value: value.into(),
            group,
        }
    }

    /// First amount anywhere after the label.
    pub fn amount(field: Field, label: &str) -> Self {
        Self::new(field, label, CURRENCY, 1)
    }

    /// Identifier token right after the label.
    pub fn identifier(field: Field, label: &str) -> Self {
        Self::new(field, label, IDENTIFIER, 1)
    }

    /// Everything between the label and the nearest `anchor` word.
    pub fn name_until(field: Field, label: &str, anchor: &str) -> Self {
        Self::new(field, label, patterns::name_until(anchor), 1)
    }
}

/// The built-in rule table, in canonical field order.
///
/// Fallback rules for a field follow its primary rule.
pub fn default_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::name_until(Field::EmployeeName, EMPLOYEE_NAME_LABEL, "PAN"),
        FieldRule::identifier(Field::EmployeePan, EMPLOYEE_PAN_LABEL),
        FieldRule::identifier(Field::EmployeePan, EMPLOYEE_BARE_PAN_LABEL),
        FieldRule::name_until(Field::EmployerName, EMPLOYER_NAME_LABEL, "TAN"),
        FieldRule::identifier(Field::EmployerPan, EMPLOYER_PAN_LABEL),
        FieldRule::identifier(Field::Tan, TAN_LABEL),
        FieldRule::new(Field::AssessmentYear, ASSESSMENT_YEAR_LABEL, ASSESSMENT_YEAR, 1),
        FieldRule::amount(Field::GrossSalary, GROSS_SALARY_LABEL),
        FieldRule::amount(Field::StandardDeduction, STANDARD_DEDUCTION_LABEL),
        FieldRule::amount(Field::ProfessionalTax, PROFESSIONAL_TAX_LABEL),
        FieldRule::amount(Field::IncomeChargeable, INCOME_CHARGEABLE_LABEL),
        FieldRule::amount(Field::TotalDeductionsVia, DEDUCTIONS_VIA_LABEL),
        FieldRule::amount(Field::TotalTaxableIncome, TOTAL_TAXABLE_INCOME_LABEL),
        FieldRule::amount(Field::TaxOnTotalIncome, TAX_ON_TOTAL_INCOME_LABEL),
        FieldRule::amount(Field::Cess, CESS_LABEL),
        FieldRule::amount(Field::TotalTds, TOTAL_TDS_LABEL),
        FieldRule::amount(Field::TotalTds, NET_TAX_PAYABLE_LABEL),
    ]
}

/// A rule with its patterns compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub field: Field,
    pub label: Regex,
    pub value: Regex,
    pub group: usize,
}

/// Compiled rules for one field, tried in insertion order.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: Field,
    pub rules: Vec<CompiledRule>,
}

/// A compiled rule table covering every canonical field.
///
/// Fields without a rule are kept with an empty list so they always resolve
/// to not found.
#[derive(Debug, Clone)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    /// Compile a rule table. Several rules may target the same field.
    pub fn compile(rules: &[FieldRule]) -> Result<Self, ExtractionError> {
        let mut fields: Vec<FieldRules> = Field::ALL
            .iter()
            .map(|&field| FieldRules {
                field,
                rules: Vec::new(),
            })
            .collect();

        for rule in rules {
            let compiled = compile_rule(rule)?;
            fields[rule.field.index()].rules.push(compiled);
        }

        Ok(Self { fields })
    }

    /// Per-field rule lists in canonical order.
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Total number of compiled rules.
    pub fn len(&self) -> usize {
        self.fields.iter().map(|f| f.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn compile_rule(rule: &FieldRule) -> Result<CompiledRule, ExtractionError> {
    let build = |pattern: &str| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| ExtractionError::Pattern {
                field: rule.field.key().to_string(),
                reason: e.to_string(),
            })
    };

    let label = build(&rule.label)?;
    let value = build(&rule.value)?;

    let available = value.captures_len();
    if rule.group >= available {
        return Err(ExtractionError::Group {
            field: rule.field.key().to_string(),
            group: rule.group,
            available,
        });
    }

    Ok(CompiledRule {
        field: rule.field,
        label,
        value,
        group: rule.group,
    })
}
