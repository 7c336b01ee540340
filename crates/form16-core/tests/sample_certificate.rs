use form16_core::{
    extract, linearize_pages, ExtractionResult, Field, FieldEngine, Form16Extractor, Report,
    NOT_FOUND,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

const PART_A: &str = "FORM NO. 16
[See rule 31(1)(a)]
PART A
Certificate under section 203 of the Income-tax Act, 1961 for tax deducted at source on salary
Name of the Employer: Infosys Limited Electronics City Bengaluru
TAN of Deductor: BLRI01234F
PAN of the Deductor: AAACI1234G
Name of the Employee: Ravi Kumar Sharma
PAN of the Employee: ABCPS1234K
Assessment Year 2024-25
Period with the Employer From 01-Apr-2023 To 31-Mar-2024
Summary of amount paid/credited and tax deducted at source thereon
Q1 2,12,500.00 9,365.00
Q2 2,12,500.00 9,365.00";

const PART_B: &str = "PART B (Annexure)
Details of Salary Paid and any other income and tax deducted
1. Gross Salary
(a) Salary as per provisions contained in section 17(1) 8,50,000.00
(b) Value of perquisites under section 17(2) 0.00
4. Deductions :
(a) Standard deduction under section 16(ia) 50,000.00
(c) Tax on employment under section 16(iii) 2,400.00
5. Total amount of deductions under section 16 52,400.00
6. Income chargeable under the head \"Salaries\" [(3+1(e)-5] 7,97,600.00
10. Deductions under Chapter VI-A
(a) Deduction in respect of life insurance premia under section 80C 1,50,000.00
11. Aggregate of deductible amount under Chapter VI-A 1,75,000.00
12. Total taxable income (9-11) 6,22,600.00
13. Tax on total income 36,020.00
16. Health and education cess 1,441.00
Total Tax Deducted at Source 37,461.00";

fn sample_text() -> String {
    linearize_pages([PART_A, PART_B])
}

#[test]
fn test_extracts_every_field_from_sample() {
    let result = extract(&sample_text());

    let expected = [
        (Field::EmployeeName, "Ravi Kumar Sharma"),
        (Field::EmployeePan, "ABCPS1234K"),
        (Field::EmployerName, "Infosys Limited Electronics City Bengaluru"),
        (Field::EmployerPan, "AAACI1234G"),
        (Field::Tan, "BLRI01234F"),
        (Field::AssessmentYear, "2024-25"),
        (Field::GrossSalary, "8,50,000.00"),
        (Field::StandardDeduction, "50,000.00"),
        (Field::ProfessionalTax, "2,400.00"),
        (Field::IncomeChargeable, "7,97,600.00"),
        (Field::TotalDeductionsVia, "1,75,000.00"),
        (Field::TotalTaxableIncome, "6,22,600.00"),
        (Field::TaxOnTotalIncome, "36,020.00"),
        (Field::Cess, "1,441.00"),
        (Field::TotalTds, "37,461.00"),
    ];

    let actual: Vec<(Field, &str)> = result.iter().collect();
    assert_eq!(actual, expected.to_vec());
    assert!(result.issues().is_empty());
}

#[test]
fn test_sample_amounts_are_consistent() {
    let result = extract(&sample_text());
    let amount = |f| result.amount(f).unwrap();

    assert_eq!(
        amount(Field::GrossSalary) - amount(Field::StandardDeduction) - amount(Field::ProfessionalTax),
        amount(Field::IncomeChargeable)
    );
    assert_eq!(
        amount(Field::TaxOnTotalIncome) + amount(Field::Cess),
        amount(Field::TotalTds)
    );
    assert_eq!(amount(Field::TotalTds), Decimal::new(3746100, 2));
}

#[test]
fn test_parallel_matches_sequential() {
    let text = sample_text();
    let sequential = FieldEngine::new().extract(&text);
    let parallel = FieldEngine::new().with_parallel(true).extract(&text);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_detailed_spans_point_at_values() {
    let text = sample_text();
    let detailed = FieldEngine::new().extract_detailed(&text);

    assert_eq!(detailed.matches.len(), Field::ALL.len());
    assert!(!detailed.truncated);
    for m in &detailed.matches {
        assert!(m.label_span.1 <= m.value_span.0);
        assert!(text[m.value_span.0..m.value_span.1].contains(&m.value));
    }
}

#[test]
fn test_unrelated_document_is_all_not_found() {
    let text = linearize_pages(["Quarterly newsletter\nNothing to see here 12.50", "Page two"]);
    let result = extract(&text);

    assert_eq!(result.found_count(), 0);
    assert!(!result.looks_like_form16());
    assert!(result.iter().all(|(_, v)| v == NOT_FOUND));
}

#[test]
fn test_report_round_trip_through_json() {
    let result = extract(&sample_text());
    let json = serde_json::to_string(&result).unwrap();

    let back: ExtractionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);

    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(Report::from_mapping(&map), Report::from_result(&result));
}
