//! Form 16 field set and the fixed-key extraction result.

use std::fmt;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::extraction::rules::{
    format_indian_amount, pan_holder, parse_amount, validate_assessment_year, validate_pan,
    validate_tan, PanHolder,
};

/// Sentinel value for a field that could not be located.
pub const NOT_FOUND: &str = "Not Found";

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text delimited by a following anchor label.
    Name,
    /// 10-character PAN/TAN token.
    Identifier,
    /// Assessment year (`2024-25`).
    Year,
    /// Comma-grouped amount with two decimals.
    Amount,
}

/// A named field of the Form 16 certificate.
///
/// The declaration order is the canonical enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    EmployeeName,
    EmployeePan,
    EmployerName,
    EmployerPan,
    Tan,
    AssessmentYear,
    GrossSalary,
    StandardDeduction,
    ProfessionalTax,
    IncomeChargeable,
    TotalDeductionsVia,
    TotalTaxableIncome,
    TaxOnTotalIncome,
    Cess,
    TotalTds,
}

impl Field {
    /// Every field, in canonical order.
    pub const ALL: [Field; 15] = [
        Field::EmployeeName,
        Field::EmployeePan,
        Field::EmployerName,
        Field::EmployerPan,
        Field::Tan,
        Field::AssessmentYear,
        Field::GrossSalary,
        Field::StandardDeduction,
        Field::ProfessionalTax,
        Field::IncomeChargeable,
        Field::TotalDeductionsVia,
        Field::TotalTaxableIncome,
        Field::TaxOnTotalIncome,
        Field::Cess,
        Field::TotalTds,
    ];

    /// Position in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mapping key used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Field::EmployeeName => "employeeName",
            Field::EmployeePan => "employeePAN",
            Field::EmployerName => "employerName",
            Field::EmployerPan => "employerPAN",
            Field::Tan => "TAN",
            Field::AssessmentYear => "assessmentYear",
            Field::GrossSalary => "grossSalary",
            Field::StandardDeduction => "standardDeduction",
            Field::ProfessionalTax => "professionalTax",
            Field::IncomeChargeable => "incomeChargeable",
            Field::TotalDeductionsVia => "totalDeductionsVIA",
            Field::TotalTaxableIncome => "totalTaxableIncome",
            Field::TaxOnTotalIncome => "taxOnTotalIncome",
            Field::Cess => "cess",
            Field::TotalTds => "totalTDS",
        }
    }

    /// Human readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Field::EmployeeName => "Employee Name",
            Field::EmployeePan => "Employee PAN",
            Field::EmployerName => "Employer Name",
            Field::EmployerPan => "Employer PAN",
            Field::Tan => "Employer TAN",
            Field::AssessmentYear => "Assessment Year",
            Field::GrossSalary => "Gross Salary",
            Field::StandardDeduction => "Standard Deduction",
            Field::ProfessionalTax => "Professional Tax",
            Field::IncomeChargeable => "Income Chargeable under Salaries",
            Field::TotalDeductionsVia => "Deductions under Chapter VI-A",
            Field::TotalTaxableIncome => "Total Taxable Income",
            Field::TaxOnTotalIncome => "Tax on Total Income",
            Field::Cess => "Health & Education Cess",
            Field::TotalTds => "Total TDS",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::EmployeeName | Field::EmployerName => FieldKind::Name,
            Field::EmployeePan | Field::EmployerPan | Field::Tan => FieldKind::Identifier,
            Field::AssessmentYear => FieldKind::Year,
            _ => FieldKind::Amount,
        }
    }

    /// Look up a field by its mapping key (case-sensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Extraction output: one slot per canonical field, `None` meaning not found.
///
/// Serializes as a JSON object with the canonical keys in canonical order;
/// missing values serialize as `"Not Found"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    values: Vec<Option<String>>,
}

impl ExtractionResult {
    /// Create a result with every field set to not found.
    pub fn new() -> Self {
        Self {
            values: vec![None; Field::ALL.len()],
        }
    }

    /// Set a field value. Empty values and the sentinel are stored as not found.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.values[field.index()] = if value.is_empty() || value == NOT_FOUND {
            None
        } else {
            Some(value)
        };
    }

    /// Reset a field to not found.
    pub fn clear(&mut self, field: Field) {
        self.values[field.index()] = None;
    }

    /// Field value, or the `"Not Found"` sentinel.
    pub fn get(&self, field: Field) -> &str {
        self.value(field).unwrap_or(NOT_FOUND)
    }

    /// Field value if it was found.
    pub fn value(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    pub fn is_found(&self, field: Field) -> bool {
        self.values[field.index()].is_some()
    }

    /// Iterate `(field, value-or-sentinel)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    /// Number of fields that were found.
    pub fn found_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether anything at all was found. An empty result usually means the
    /// input is not a Form 16.
    pub fn looks_like_form16(&self) -> bool {
        self.found_count() > 0
    }

    /// Parse a monetary field as a decimal amount.
    pub fn amount(&self, field: Field) -> Option<Decimal> {
        if field.kind() != FieldKind::Amount {
            return None;
        }
        self.value(field).and_then(parse_amount)
    }

    /// Advisory checks on the identifier and year formats and on the
    /// salary arithmetic.
    ///
    /// Values are never altered; this only reports what looks suspicious.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for field in [Field::EmployeePan, Field::EmployerPan] {
            if let Some(pan) = self.value(field) {
                if !validate_pan(pan) {
                    issues.push(format!("{} '{}' is not a valid PAN", field.label(), pan));
                }
            }
        }

        if let Some(holder) = self.value(Field::EmployeePan).and_then(pan_holder) {
            if holder != PanHolder::Individual {
                issues.push(format!(
                    "{} belongs to a {:?}, not an individual",
                    Field::EmployeePan.label(),
                    holder
                ));
            }
        }

        if let Some(tan) = self.value(Field::Tan) {
            if !validate_tan(tan) {
                issues.push(format!("{} '{}' is not a valid TAN", Field::Tan.label(), tan));
            }
        }

        if let Some(year) = self.value(Field::AssessmentYear) {
            if !validate_assessment_year(year) {
                issues.push(format!("Assessment year '{}' does not span consecutive years", year));
            }
        }

        if let (Some(gross), Some(standard), Some(professional), Some(chargeable)) = (
            self.amount(Field::GrossSalary),
            self.amount(Field::StandardDeduction),
            self.amount(Field::ProfessionalTax),
            self.amount(Field::IncomeChargeable),
        ) {
            let expected = gross - standard - professional;
            if expected != chargeable {
                issues.push(format!(
                    "{} {} differs from gross salary less deductions ({})",
                    Field::IncomeChargeable.label(),
                    format_indian_amount(chargeable),
                    format_indian_amount(expected)
                ));
            }
        }

        let missing: Vec<&str> = Field::ALL
            .iter()
            .filter(|f| !self.is_found(**f))
            .map(|f| f.key())
            .collect();
        if !missing.is_empty() {
            issues.push(format!("Missing fields: {}", missing.join(", ")));
        }

        issues
    }

    /// Build a result from a JSON mapping. Unknown keys are ignored, `null`
    /// and the sentinel map to not found, other non-string values keep their
    /// JSON text.
    pub fn from_mapping(map: &Map<String, Value>) -> Self {
        let mut result = Self::new();
        for (key, value) in map {
            if let Some(field) = Field::from_key(key) {
                if let Some(text) = json_value_text(value) {
                    result.insert(field, text);
                }
            }
        }
        result
    }

    /// Convert to a JSON mapping with canonical keys.
    pub fn to_mapping(&self) -> Map<String, Value> {
        self.iter()
            .map(|(f, v)| (f.key().to_string(), Value::String(v.to_string())))
            .collect()
    }
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_mapping(&map))
    }
}

/// Text of a JSON value as shown in reports; `None` for `null`.
pub fn json_value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("employeename"), None);
    }

    #[test]
    fn test_new_result_is_all_not_found() {
        let result = ExtractionResult::new();
        assert_eq!(result.found_count(), 0);
        assert!(!result.looks_like_form16());
        assert!(result.iter().all(|(_, v)| v == NOT_FOUND));
    }

    #[test]
    fn test_insert_sentinel_and_empty_stay_missing() {
        let mut result = ExtractionResult::new();
        result.insert(Field::Tan, NOT_FOUND);
        result.insert(Field::Cess, "");
        assert!(!result.is_found(Field::Tan));
        assert!(!result.is_found(Field::Cess));

        result.insert(Field::Tan, "ABCD12345E");
        assert_eq!(result.get(Field::Tan), "ABCD12345E");
        result.clear(Field::Tan);
        assert_eq!(result.get(Field::Tan), NOT_FOUND);
    }

    #[test]
    fn test_serialize_keeps_canonical_order() {
        let mut result = ExtractionResult::new();
        result.insert(Field::TotalTds, "1,000.00");
        result.insert(Field::EmployeeName, "Ravi Kumar");

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.starts_with(r#"{"employeeName":"Ravi Kumar","employeePAN":"Not Found""#));
        assert!(json.ends_with(r#""totalTDS":"1,000.00"}"#));
    }

    #[test]
    fn test_from_mapping() {
        let map: Map<String, Value> = serde_json::from_str(
            r#"{"TAN": "ABCD12345E", "cess": null, "grossSalary": 1200, "extra": "x", "employerName": "Not Found"}"#,
        )
        .unwrap();
        let result = ExtractionResult::from_mapping(&map);

        assert_eq!(result.get(Field::Tan), "ABCD12345E");
        assert_eq!(result.get(Field::GrossSalary), "1200");
        assert!(!result.is_found(Field::Cess));
        assert!(!result.is_found(Field::EmployerName));
        assert_eq!(result.found_count(), 2);
    }

    #[test]
    fn test_deserialize_after_serialize() {
        let mut result = ExtractionResult::new();
        result.insert(Field::AssessmentYear, "2024-25");
        let json = serde_json::to_string(&result).unwrap();
        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_amount_only_for_monetary_fields() {
        let mut result = ExtractionResult::new();
        result.insert(Field::GrossSalary, "1,23,456.00");
        result.insert(Field::Tan, "ABCD12345E");

        assert_eq!(result.amount(Field::GrossSalary), Some(Decimal::new(12345600, 2)));
        assert_eq!(result.amount(Field::Tan), None);
        assert_eq!(result.amount(Field::Cess), None);
    }

    #[test]
    fn test_issues_report_bad_identifiers() {
        let mut result = ExtractionResult::new();
        result.insert(Field::EmployeePan, "ABCDE1234F");
        result.insert(Field::EmployerPan, "1234567890");
        result.insert(Field::Tan, "ABCD12345E");
        result.insert(Field::AssessmentYear, "2024-26");

        let issues = result.issues();
        assert!(issues.iter().any(|i| i.contains("Employer PAN")));
        assert!(!issues.iter().any(|i| i.contains("Employee PAN")));
        assert!(!issues.iter().any(|i| i.contains("TAN '")));
        assert!(issues.iter().any(|i| i.contains("2024-26")));
        assert!(issues.iter().any(|i| i.starts_with("Missing fields: employeeName")));
    }

    #[test]
    fn test_issues_flag_non_individual_employee_pan() {
        let mut result = ExtractionResult::new();
        result.insert(Field::EmployeePan, "AAACB1234F");
        let issues = result.issues();
        assert!(issues.iter().any(|i| i.contains("Company, not an individual")));

        result.insert(Field::EmployeePan, "AAAPB1234F");
        assert!(!result.issues().iter().any(|i| i.contains("not an individual")));
    }

    #[test]
    fn test_issues_check_income_chargeable() {
        let mut result = ExtractionResult::new();
        result.insert(Field::GrossSalary, "12,00,000.00");
        result.insert(Field::StandardDeduction, "50,000.00");
        result.insert(Field::ProfessionalTax, "2,500.00");
        result.insert(Field::IncomeChargeable, "11,47,500.00");
        assert!(!result.issues().iter().any(|i| i.contains("differs")));

        result.insert(Field::IncomeChargeable, "11,50,000.00");
        let issues = result.issues();
        assert!(issues.iter().any(|i| i.contains("11,50,000.00 differs") && i.contains("(11,47,500.00)")));
    }
}
