use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_arcadia")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("arcadia-{name}-{stamp}.json"))
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: arcadia <serve|mix|list|validate|import>"));
}

#[test]
fn mix_command_emits_potion_json() {
    let output = Command::new(bin())
        .args(["mix", "wheat,blue mountain flower", "15", "0"])
        .output()
        .expect("mix should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("mix should emit json");
    assert_eq!(payload["kind"], "success");
    assert_eq!(
        payload["display_name"],
        "Potion of Restore Health & Fortify Health"
    );
    assert_eq!(payload["value"], 17);
}

#[test]
fn mix_command_supports_table_output() {
    let output = Command::new(bin())
        .args(["mix", "deathbell,river betty", "15", "0", "--table"])
        .output()
        .expect("mix should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("kind\tname\tmultiplier\tvalue\teffects"));
    let row = lines.next().expect("table should have a data row");
    assert!(row.starts_with("success\tPoison of Damage Health & Slow\t1.23\t47"));
}

#[test]
fn mix_command_rejects_unknown_ingredients() {
    let output = Command::new(bin())
        .args(["mix", "wheat,spriggan sap"])
        .output()
        .expect("mix should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown ingredient 'spriggan sap'"));
}

#[test]
fn mix_command_defaults_malformed_level_input() {
    let output = Command::new(bin())
        .args(["mix", "wheat,garlic", "abc"])
        .output()
        .expect("mix should run");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid level 'abc', defaulting to 15"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("mix should emit json");
    assert_eq!(payload["kind"], "failed");
}

#[test]
fn list_command_prints_the_catalog_table() {
    let output = Command::new(bin())
        .arg("list")
        .output()
        .expect("list should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("name\tvalue\teffects"));
    assert!(stdout.contains("Deathbell"));
    assert!(stdout.contains("Damage Health; Ravage Stamina; Slow; Weakness to Poison"));
}

#[test]
fn list_command_filters_by_query() {
    let output = Command::new(bin())
        .args(["list", "bell"])
        .output()
        .expect("list should run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deathbell"));
    assert!(!stdout.contains("Garlic"));
}

#[test]
fn validate_command_accepts_the_shipped_catalog() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn validate_command_fails_on_missing_file() {
    let output = Command::new(bin())
        .args(["validate", "data/ingredients/no-such-file.json"])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
}

#[test]
fn import_command_returns_usage_without_path() {
    let output = Command::new(bin())
        .arg("import")
        .output()
        .expect("import should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: arcadia import"));
}

#[test]
fn import_command_writes_the_canonical_catalog() {
    let source = unique_temp_path("cli-raw");
    let output_path = unique_temp_path("cli-canonical");
    fs::write(
        &source,
        r#"[{"name": "Wheat", "value": 5, "effects": ["Restore Health"]},
           {"name": "Garlic", "value": 1, "effects": ["Resist Poison"]}]"#,
    )
    .expect("raw file should be writable");

    let output = Command::new(bin())
        .args([
            "import",
            source.to_str().unwrap(),
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("import should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("import complete: records=2, skipped=0"));

    let written = fs::read_to_string(&output_path).expect("canonical output should exist");
    let payload: serde_json::Value =
        serde_json::from_str(&written).expect("canonical output should be json");
    assert_eq!(payload["ingredients"].as_array().map(Vec::len), Some(2));

    let _ = fs::remove_file(&source);
    let _ = fs::remove_file(&output_path);
}
