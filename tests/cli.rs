use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn holiday_export() -> Command {
    let mut cmd = Command::cargo_bin("holiday-export").unwrap();
    cmd.env("HOLIDAY_EXPORT_LOG", "warn")
        .env_remove("HOLIDAY_EXPORT_OUTPUT_DIR");
    cmd
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_no_subcommand_prints_hint() {
    holiday_export()
        .assert()
        .success()
        .stdout(predicate::str::contains("holiday-export --help"));
}

#[test]
fn test_countries_lists_builtin_calendar() {
    holiday_export()
        .arg("countries")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deutschland"))
        .stdout(predicate::str::contains("PT"));
}

#[test]
fn test_export_single_year() {
    let temp_dir = TempDir::new().unwrap();

    holiday_export()
        .args(["export", "-c", "DE", "-y", "2024", "-o"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 9 holidays"));

    let output = read_json(&temp_dir.path().join("holidays-2024.json"));
    let records = output.as_array().unwrap();
    assert_eq!(records.len(), 9);
    assert_eq!(records[0]["name"], "Neujahr");
    assert_eq!(records[0]["countryCode"], "DE");
    assert_eq!(records[0]["countryName"], "Deutschland");
}

#[test]
fn test_export_with_reshaped_fields() {
    let temp_dir = TempDir::new().unwrap();

    holiday_export()
        .args([
            "export",
            "--countries",
            "de,pt",
            "--years",
            "2023-2024",
            "--file-name",
            "all",
            "--omit",
            "countryName",
            "--rename",
            "countryCode=country",
            "--output",
        ])
        .arg(temp_dir.path())
        .assert()
        .success();

    let output = read_json(&temp_dir.path().join("all.json"));
    let records = output.as_array().unwrap();
    assert!(records.iter().all(|r| r.get("countryName").is_none()));
    assert_eq!(records.first().unwrap()["country"], "DE");
    assert_eq!(records.last().unwrap()["country"], "PT");
}

#[test]
fn test_export_csv() {
    let temp_dir = TempDir::new().unwrap();

    holiday_export()
        .args(["export", "-c", "FR", "-y", "2024", "-f", "csv", "-o"])
        .arg(temp_dir.path())
        .assert()
        .success();

    let csv = std::fs::read_to_string(temp_dir.path().join("holidays-2024.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,name,type,countryCode,countryName"
    );
    assert_eq!(lines.next().unwrap(), "2024-01-01,Nouvel An,public,FR,France");
}

#[test]
fn test_export_from_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("exports");
    let settings = temp_dir.path().join("export.yaml");
    std::fs::write(
        &settings,
        format!(
            "years: [2024]\ncountries: [US]\ntypes: [public]\nfile_name: us\noutput_path: {}\n",
            output.display()
        ),
    )
    .unwrap();

    holiday_export()
        .args(["export", "--config"])
        .arg(&settings)
        .assert()
        .success();

    let records = read_json(&output.join("us.json"));
    assert!(records
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["name"] == "Thanksgiving Day" && r["date"] == "2024-11-28"));
}

#[test]
fn test_settings_file_countries_match_flag_casing() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("export.json");
    std::fs::write(&settings, r#"{ "countries": ["de"], "years": [2024] }"#).unwrap();

    holiday_export()
        .args(["export", "--config"])
        .arg(&settings)
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .success();

    let records = read_json(&temp_dir.path().join("holidays-2024.json"));
    assert!(records
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["countryCode"] == "DE"));
}

#[test]
fn test_output_dir_from_env() {
    let temp_dir = TempDir::new().unwrap();

    holiday_export()
        .env("HOLIDAY_EXPORT_OUTPUT_DIR", temp_dir.path())
        .args(["export", "-c", "IT", "-y", "2024"])
        .assert()
        .success();

    assert!(temp_dir.path().join("holidays-2024.json").exists());
}

#[test]
fn test_unknown_country_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();

    holiday_export()
        .args(["export", "-c", "DE,XX", "-y", "2024", "-o"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown country: XX"));

    assert!(!temp_dir.path().join("holidays-2024.json").exists());
}

#[test]
fn test_best_effort_skips_unknown_country() {
    let temp_dir = TempDir::new().unwrap();

    holiday_export()
        .args(["export", "-c", "DE,XX", "-y", "2024", "--best-effort", "-o"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped"));

    let records = read_json(&temp_dir.path().join("holidays-2024.json"));
    assert_eq!(records.as_array().unwrap().len(), 9);
}

#[test]
fn test_invalid_holiday_type_rejected() {
    holiday_export()
        .args(["export", "-t", "weekend"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown holiday type"));
}
