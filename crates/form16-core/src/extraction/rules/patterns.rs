//! Pattern sources for Form 16 label and value matching.
//!
//! Rule patterns are plain strings compiled case-insensitively with `.`
//! matching newlines (see [`super::RuleSet::compile`]). The standalone
//! format checks at the bottom are compiled as-is.

use lazy_static::lazy_static;
use regex::Regex;

/// Comma-grouped amount with exactly two decimals, e.g. `12,34,567.89`.
///
/// The trailing group rejects dotted dates (`31.03.2024`) and longer
/// fractions. Periods after the amount are allowed as long as the first
/// one is not followed by a digit, so leaders like `6,22,600.00......` match.
pub const CURRENCY: &str = r"([0-9]+(?:,[0-9]+)*\.[0-9]{2})(?:$|[^0-9.]|\.(?:$|[^0-9]))";

/// 10-character identifier right after the label and an optional separator.
pub const IDENTIFIER: &str = r"^\s*[:\-–]?\s*([A-Z0-9]{10})\b";

/// `2024-25` or `2024-2025`, anywhere after the label.
pub const ASSESSMENT_YEAR: &str = r"\b([0-9]{4}\s*[-–]\s*(?:[0-9]{4}|[0-9]{2}))\b";

// Identity labels
pub const EMPLOYER_NAME_LABEL: &str =
    r"\bName\s+(?:and\s+address\s+)?of\s+(?:the\s+)?Employer(?:\s*/\s*Specified\s+Bank)?";
pub const EMPLOYEE_NAME_LABEL: &str =
    r"\bName\s+(?:and\s+address\s+)?of\s+(?:the\s+)?Employee(?:\s*/\s*Specified\s+senior\s+citizen)?";
pub const EMPLOYER_PAN_LABEL: &str = r"\bPAN\s+of\s+(?:the\s+)?(?:Deductor|Employer)\b";
pub const EMPLOYEE_PAN_LABEL: &str =
    r"\bPAN\s+of\s+(?:the\s+)?Employee(?:\s*/\s*Specified\s+senior\s+citizen)?\b";
/// Bare `PAN` shortly after the employee name label, for layouts such as
/// `Name of the Employee: Ravi Kumar PAN: ABCPK1234L`.
pub const EMPLOYEE_BARE_PAN_LABEL: &str =
    r"\bName\s+(?:and\s+address\s+)?of\s+(?:the\s+)?Employee\b.{0,256}?\bPAN\b";
pub const TAN_LABEL: &str = r"\bTAN(?:\s+of\s+(?:the\s+)?(?:Deductor|Employer))?\b";
pub const ASSESSMENT_YEAR_LABEL: &str = r"\bAssessment\s+Year\b";

// Income and deduction labels
pub const GROSS_SALARY_LABEL: &str = r"\bGross\s+Salary\b";
pub const STANDARD_DEDUCTION_LABEL: &str = r"\bStandard\s+deduction\b";
pub const PROFESSIONAL_TAX_LABEL: &str = r"\b(?:Tax\s+on\s+employment|Professional\s+Tax)\b";
pub const INCOME_CHARGEABLE_LABEL: &str = r"\bIncome\s+chargeable\s+under\s+the\s+head\b";
pub const DEDUCTIONS_VIA_LABEL: &str = r"\b(?:Aggregate\s+of\s+deductible\s+amounts?|Total\s+(?:of\s+)?deductions?)\s+under\s+Chapter\s+VI-?A\b";

// Tax computation labels
pub const TOTAL_TAXABLE_INCOME_LABEL: &str = r"\bTotal\s+taxable\s+income\b";
pub const TAX_ON_TOTAL_INCOME_LABEL: &str = r"\bTax\s+on\s+total\s+income\b";
pub const CESS_LABEL: &str = r"\b(?:(?:Health\s+and\s+)?Education\s+)?Cess\b";
pub const TOTAL_TDS_LABEL: &str = r"\b(?:Total\s+Tax\s+Deducted(?:\s+at\s+Source)?|Total\s+TDS)\b";
pub const NET_TAX_PAYABLE_LABEL: &str = r"\bNet\s+tax\s+payable\b";

/// Value pattern for a name that runs up to the nearest `anchor` word.
pub fn name_until(anchor: &str) -> String {
    format!(r"^(.*?)\b{}\b", anchor)
}

lazy_static! {
    // Income-tax PAN: five letters, four digits, one letter
    pub static ref PAN_FORMAT: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();

    // Tax deduction account number: four letters, five digits, one letter
    pub static ref TAN_FORMAT: Regex = Regex::new(r"^[A-Z]{4}[0-9]{5}[A-Z]$").unwrap();

    pub static ref ASSESSMENT_YEAR_FORMAT: Regex =
        Regex::new(r"^([0-9]{4})\s*[-–]\s*([0-9]{4}|[0-9]{2})$").unwrap();
}
