use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CERTIFICATE: &str = "Name of the Employer: Acme Software Pvt Ltd TAN: MUMA12345B \
PAN of the Deductor: AAACA1234C Name of the Employee: Priya Nair PAN of the Employee: ABCPN1234D \
Assessment Year 2024-25\n\
1. Gross Salary (a) as per provisions contained in section 17(1) 12,00,000.00 \
Standard deduction under section 16(ia) 50,000.00 \
Professional Tax under section 16(iii) 2,500.00 \
Income chargeable under the head Salaries 11,47,500.00 \
Total deductions under Chapter VI-A 1,50,000.00 \
Total taxable income 9,97,500.00 Tax on total income 1,12,000.00 \
Health and Education Cess 4,480.00 Total TDS 1,16,480.00\n";

fn form16() -> Command {
    Command::cargo_bin("form16").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json_from_text_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "cert.txt", CERTIFICATE);

    let output = form16().arg("extract").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["employerName"], "Acme Software Pvt Ltd");
    assert_eq!(json["TAN"], "MUMA12345B");
    assert_eq!(json["professionalTax"], "2,500.00");
    assert_eq!(json["totalTDS"], "1,16,480.00");
    assert_eq!(json.as_object().unwrap().len(), 15);
}

#[test]
fn test_extract_csv_and_text_formats() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "cert.txt", CERTIFICATE);

    form16()
        .args(["extract", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Field,Value\n"))
        .stdout(predicate::str::contains("employeePAN,ABCPN1234D"));

    form16()
        .args(["extract", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Income & Deductions"))
        .stdout(predicate::str::contains("Priya Nair"));
}

#[test]
fn test_extract_warns_on_unrelated_text() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "note.txt", "shopping list: milk, eggs\n");

    form16()
        .args(["extract", "--validate"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grossSalary\": \"Not Found\""))
        .stderr(predicate::str::contains("No Form 16 fields were found"))
        .stderr(predicate::str::contains("Missing fields"));
}

#[test]
fn test_extract_missing_file_fails() {
    form16()
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_writes_summary_pdf() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "cert.txt", CERTIFICATE);
    let pdf = dir.path().join("summary.pdf");
    let out = dir.path().join("cert.json");

    form16()
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--summary-pdf")
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary PDF written"));

    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    assert!(fs::read_to_string(&out).unwrap().contains("Acme Software Pvt Ltd"));
}

#[test]
fn test_render_mapping_with_extra_keys() {
    let dir = TempDir::new().unwrap();
    let mapping = write(
        dir.path(),
        "fields.json",
        r#"{"employeeName": "Priya Nair", "cess": null, "remarks": "revised"}"#,
    );

    form16()
        .arg("render")
        .arg(&mapping)
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal & Employer Information"))
        .stdout(predicate::str::contains("Additional Fields"))
        .stdout(predicate::str::contains("revised"));
}

#[test]
fn test_render_rejects_non_object() {
    let dir = TempDir::new().unwrap();
    let mapping = write(dir.path(), "fields.json", "[1, 2, 3]");

    form16()
        .arg("render")
        .arg(&mapping)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected a JSON object"));
}

#[test]
fn test_summary_from_mapping() {
    let dir = TempDir::new().unwrap();
    let mapping = write(dir.path(), "fields.json", r#"{"TAN": "MUMA12345B"}"#);
    let pdf = dir.path().join("out.pdf");

    form16()
        .arg("summary")
        .arg(&mapping)
        .arg("-o")
        .arg(&pdf)
        .assert()
        .success();

    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_batch_with_summary_csv() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", CERTIFICATE);
    write(dir.path(), "b.txt", "not a certificate\n");
    let out_dir = dir.path().join("out");
    let pattern = format!("{}/*.txt", dir.path().display());

    form16()
        .args(["batch", pattern.as_str(), "-j", "2", "--summary", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert!(lines.next().unwrap().starts_with("filename,status,found_fields,employeeName"));
    assert!(lines.next().unwrap().starts_with("a.txt,success,15,Priya Nair"));
    assert!(lines.next().unwrap().starts_with("b.txt,success,0,Not Found"));
}

#[test]
fn test_batch_no_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.pdf", dir.path().display());

    form16()
        .args(["batch", pattern.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    form16()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    form16()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "extraction.search_window", "1024"])
        .assert()
        .success();

    form16()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "extraction.search_window"])
        .assert()
        .success()
        .stdout("1024\n");

    form16()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
