// End-to-end tests of the eegcompare binary

mod utils;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn eegcompare(data: &TempDir, out: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eegcompare").unwrap();
    cmd.arg(data.path())
        .arg("--output")
        .arg(out.path().join("cleaned_data.csv"));
    cmd
}

// ============================================================================
// Text report
// ============================================================================

#[test]
fn test_text_report_lists_significant_region() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sensor Positions with Most Pronounced Differences",
        ))
        .stdout(predicate::str::contains(
            "The following regions have shown a significant difference (p < 0.05):",
        ))
        .stdout(predicate::str::contains("Motor Cortex: FC5"))
        .stdout(predicate::str::contains("Central Sulcus:").not());
}

#[test]
fn test_excluded_and_unknown_positions_not_significant() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown Region").not())
        .stdout(predicate::str::contains(": X").not());
}

#[test]
fn test_cleaned_table_written() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out).assert().success();

    let cleaned = fs::read_to_string(out.path().join("cleaned_data.csv")).unwrap();
    let mut lines = cleaned.lines();
    assert_eq!(lines.next(), Some(utils::HEADER));
    // 5 trials x 2 conditions x 4 positions x 2 groups
    assert_eq!(lines.count(), 80);
}

#[test]
fn test_top_limits_ranking() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .arg("--top")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Top 2 Sensor Positions with Most Pronounced Differences",
        ));
}

#[test]
fn test_strict_alpha_still_runs() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .arg("--alpha")
        .arg("0.000000000001")
        .assert()
        .success()
        .stdout(predicate::str::contains("p < 0.000000000001").or(predicate::str::contains(
            "No sensor positions showed statistically significant differences.",
        )));
}

// ============================================================================
// Machine-readable formats
// ============================================================================

#[test]
fn test_json_output() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    let output = eegcompare(&data, &out)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["format"], "eegcompare-json-v1");
    assert_eq!(value["ingest"]["files_loaded"], 2);
    assert_eq!(value["significance"]["regions"][0]["region"], "Motor Cortex");
    assert_eq!(value["significance"]["regions"][0]["positions"][0], "FC5");
}

#[test]
fn test_csv_output_sections() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("# top_differences"))
        .stdout(predicate::str::contains("# significant_positions"))
        .stdout(predicate::str::contains("Motor Cortex,FC5,"))
        .stdout(predicate::str::contains("# condition_stats"))
        .stdout(predicate::str::contains("# region_means"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_renames_groups() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    let config = out.path().join("analysis.toml");
    fs::write(&config, "group1 = \"c\"\ngroup2 = \"a\"\ntop_n = 3\n").unwrap();

    eegcompare(&data, &out)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 3 Sensor Positions"))
        .stdout(predicate::str::contains("c mean"));
}

#[test]
fn test_custom_region_rules() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    let rules = out.path().join("rules.toml");
    fs::write(
        &rules,
        "[[region_rule]]\nprefixes = [\"FC\"]\nregion = \"Frontal Lobe\"\n",
    )
    .unwrap();

    eegcompare(&data, &out)
        .arg("--region-rules")
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontal Lobe: FC5"));
}

#[test]
fn test_frontal_first_preset() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .arg("--region-preset")
        .arg("frontal-first")
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontal Lobe: FC5"))
        .stdout(predicate::str::contains("Motor Cortex: FC5").not());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_data_dir_fails() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("eegcompare").unwrap();
    cmd.arg(out.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data directory not found"));
}

#[test]
fn test_empty_data_dir_fails() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    eegcompare(&data, &out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No rows ingested"));
}

#[test]
fn test_same_groups_rejected() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .arg("--group2")
        .arg("a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_invalid_alpha_rejected() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    utils::write_recordings(data.path());

    eegcompare(&data, &out)
        .arg("--alpha")
        .arg("2")
        .assert()
        .failure();
}

#[test]
fn test_unknown_format_rejected() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    eegcompare(&data, &out).arg("--format").arg("xml").assert().failure();
}
