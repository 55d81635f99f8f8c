//! Inspector runs over files written to a temporary directory.

use std::fs;
use std::io::Write;

use company_inspector::{
    CsvEmployeeSource, DataError, HierarchyAnalyzer, Inspector, JsonPresenter, LoadError,
    RunOutcome, StructureError,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const HEADER: &str = "Id,firstName,lastName,salary,managerId\n";

fn write_csv(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).expect("create csv");
    file.write_all(HEADER.as_bytes()).expect("write header");
    file.write_all(body.as_bytes()).expect("write body");
    path
}

fn text_inspector() -> Inspector {
    Inspector::default()
}

#[test]
fn test_long_chain_does_not_overflow() {
    // Flat salaries put every manager 200 below the band; managers from
    // depth 5 onwards also overshoot the reporting line limit.
    const LEN: u32 = 5_000;
    let mut body = String::from("0,Root,Boss,1000\n");
    for id in 1..LEN {
        body.push_str(&format!("{id},Emp,Lee,1000,{}\n", id - 1));
    }
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(&dir, "chain.csv", &body);

    let mut out = Vec::new();
    let outcome = text_inspector()
        .run(Some(path.as_path()), &mut out)
        .expect("write report");

    let managers = (LEN - 1) as usize;
    let deep_managers = (LEN - 6) as usize;
    assert!(matches!(
        outcome,
        RunOutcome::Completed { employees, findings }
            if employees == LEN as usize && findings == managers + deep_managers
    ));

    let text = String::from_utf8(out).expect("utf-8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Employee id=0, Root Boss earns less than expected by 200.0.")
    );
    assert_eq!(
        text.lines().last(),
        Some(format!("id={}, Emp Lee", LEN - 1).as_str())
    );
}

#[test]
fn test_trailing_manager_field_is_optional() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(
        &dir,
        "trailing.csv",
        "123,Joe,Doe,60000,\n124,Martin,Chekov,45000,123\n",
    );

    let mut out = Vec::new();
    let outcome = text_inspector()
        .run(Some(path.as_path()), &mut out)
        .expect("write report");
    assert!(matches!(
        outcome,
        RunOutcome::Completed {
            employees: 2,
            findings: 0
        }
    ));
    assert!(out.is_empty());
}

#[test]
fn test_blank_line_rejects_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(
        &dir,
        "spaced.csv",
        "123,Joe,Doe,60000\n\n124,Martin,Chekov,45000,123\n",
    );

    let mut out = Vec::new();
    let outcome = text_inspector()
        .run(Some(path.as_path()), &mut out)
        .expect("write report");
    assert!(matches!(
        outcome,
        RunOutcome::LoadFailed(LoadError::Structure(StructureError::FieldCount {
            line: 3,
            found: 1
        }))
    ));
    assert_eq!(
        String::from_utf8(out).expect("utf-8"),
        "An error occurred while processing the CSV file: \
         Invalid CSV structure: line 3: expected 4 or 5 fields, found 1\n"
    );
}

#[test]
fn test_leading_blank_line_is_the_header() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("no_header.csv");
    fs::write(&path, "\n123,Joe,Doe,60000\n124,Martin,Chekov,45000,123\n").expect("write csv");

    let mut out = Vec::new();
    let outcome = text_inspector()
        .run(Some(path.as_path()), &mut out)
        .expect("write report");
    assert!(matches!(
        outcome,
        RunOutcome::Completed {
            employees: 2,
            findings: 0
        }
    ));
}

#[test]
fn test_quoted_name_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(&dir, "quoted.csv", "123,\"Joe\",Doe,60000\n");

    let mut out = Vec::new();
    let outcome = text_inspector()
        .run(Some(path.as_path()), &mut out)
        .expect("write report");
    assert!(matches!(
        outcome,
        RunOutcome::LoadFailed(LoadError::Data(DataError::InvalidName { line: 2, .. }))
    ));
}

#[test]
fn test_json_error_for_duplicate_ids() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_csv(
        &dir,
        "dupes.csv",
        "123,Joe,Doe,60000\n124,Martin,Chekov,45000,123\n124,Bob,Chekov,47000,123\n",
    );
    let inspector = Inspector::new(
        CsvEmployeeSource,
        HierarchyAnalyzer::default(),
        Box::new(JsonPresenter),
    );

    let mut out = Vec::new();
    let outcome = inspector
        .run(Some(path.as_path()), &mut out)
        .expect("write report");
    assert!(matches!(
        outcome,
        RunOutcome::LoadFailed(LoadError::Data(DataError::DuplicateId { .. }))
    ));

    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "DUPLICATE_ID");
    assert_eq!(
        value["error"]["message"],
        "Invalid CSV data: line 4: duplicate employee id 124"
    );
}

#[test]
fn test_missing_file_reported() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.csv");

    let mut out = Vec::new();
    let outcome = text_inspector()
        .run(Some(path.as_path()), &mut out)
        .expect("write report");
    assert!(matches!(outcome, RunOutcome::LoadFailed(LoadError::Io { .. })));
    assert!(String::from_utf8(out)
        .expect("utf-8")
        .starts_with("An error occurred while processing the CSV file: Cannot read employee file"));
}
