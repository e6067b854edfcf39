use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::collections::BTreeMap;
use std::fs;

mod common;
use common::{init_db_with_data, setup_test_db, temp_out, wl};

#[test]
fn test_export_csv_round_trip_totals() {
    let db_path = setup_test_db("export_csv_summary");
    let out = temp_out("export_csv_summary", "csv");
    init_db_with_data(&db_path);

    wl().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--month", "3", "--year",
        "2024",
    ])
    .assert()
    .success()
    .stdout(contains("CSV export completed"));

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&out)
        .expect("open csv");

    let mut totals = BTreeMap::new();
    for rec in rdr.records() {
        let rec = rec.expect("record");
        assert_eq!(rec.len(), 4);
        assert_eq!(&rec[1], "");
        totals.insert(rec[0].to_string(), (rec[2].to_string(), rec[3].to_string()));
    }

    assert_eq!(totals.len(), 2);
    assert_eq!(
        totals["03/04/2024"],
        ("planning | review".to_string(), "5.50".to_string())
    );
    assert_eq!(totals["03/05/2024"], (String::new(), "1.00".to_string()));
}

#[test]
fn test_export_raw_lists_every_card() {
    let db_path = setup_test_db("export_raw");
    let out = temp_out("export_raw", "csv");
    init_db_with_data(&db_path);

    wl().args(["--db", &db_path, "export", "--format", "raw", "--file", &out])
        .assert()
        .success();

    let mut rdr = csv::Reader::from_path(&out).expect("open csv");
    let headers = rdr.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "start_time", "end_time", "valid", "description"]
    );

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.expect("record")).collect();
    assert_eq!(rows.len(), 6);
    assert_eq!(&rows[0][1], "2024-02-29 22:00:00");
    let invalid: Vec<&csv::StringRecord> = rows.iter().filter(|r| &r[3] == "0").collect();
    assert_eq!(invalid.len(), 1);
    assert_eq!(&invalid[0][4], "discarded");
}

#[test]
fn test_export_json_report() {
    let db_path = setup_test_db("export_json");
    let out = temp_out("export_json", "json");
    init_db_with_data(&db_path);

    wl().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2024-03",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read json");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(v["total_hours"], 6.5);
    assert_eq!(v["invalid_count"], 1);
    assert_eq!(v["pay"]["gross_pay"], 130.0);
    assert_eq!(v["days"].as_array().map(|d| d.len()), Some(2));
}

#[test]
fn test_export_xlsx_needs_a_month() {
    let db_path = setup_test_db("export_xlsx_nomonth");
    let out = temp_out("export_xlsx_nomonth", "xlsx");
    init_db_with_data(&db_path);

    wl().args(["--db", &db_path, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("one month"));
}

#[test]
fn test_export_xlsx_month_ledger() {
    let db_path = setup_test_db("export_xlsx");
    let out = temp_out("export_xlsx", "xlsx");
    init_db_with_data(&db_path);

    wl().args([
        "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--month", "3", "--year",
        "2024",
    ])
    .assert()
    .success()
    .stdout(contains("XLSX export completed"));

    let bytes = fs::read(&out).expect("xlsx written");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_xlsx_empty_month_still_writes_ledger() {
    let db_path = setup_test_db("export_xlsx_empty");
    let out = temp_out("export_xlsx_empty", "xlsx");
    init_db_with_data(&db_path);

    wl().args([
        "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--range", "2023-06",
    ])
    .assert()
    .success();

    assert!(fs::metadata(&out).is_ok());
}

#[test]
fn test_export_pdf_chart() {
    let db_path = setup_test_db("export_pdf");
    let out = temp_out("export_pdf", "pdf");
    init_db_with_data(&db_path);

    wl().args(["--db", &db_path, "export", "--format", "pdf", "--file", &out])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db_with_data(&db_path);

    wl().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "1999",
    ])
    .assert()
    .success()
    .stdout(contains("No timecards found"));

    assert!(fs::metadata(&out).is_err());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    wl().args([
        "--db",
        &db_path,
        "export",
        "--format",
        "csv",
        "--file",
        "relative.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_xlsx_any_end_warns_about_spillover() {
    let db_path = setup_test_db("export_xlsx_spill");
    let out = temp_out("export_xlsx_spill", "xlsx");
    init_db_with_data(&db_path);

    wl().args([
        "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--month", "3", "--year",
        "2024", "--any-end",
    ])
    .assert()
    .success()
    .stdout(contains("4.00 h from cards starting before March 2024"));

    wl().args([
        "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--month", "3", "--year",
        "2024", "--force",
    ])
    .assert()
    .success()
    .stdout(contains("starting before").not());
}
