use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root().join("fixtures").join("family").join("basic.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

#[test]
fn cli_layout_prints_positions_for_every_person() {
    let exe = assert_cmd::cargo_bin!("banyan-cli");
    let assert = Command::new(exe)
        .args(["layout", fixture().to_string_lossy().as_ref()])
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let positions = out["positions"].as_object().unwrap();
    assert_eq!(positions.len(), 6);
    assert!(positions["ravi"]["x"].is_number());
    assert!(out["width"].as_f64().unwrap() >= 800.0);
    assert!(out["height"].as_f64().unwrap() >= 600.0);
}

#[test]
fn cli_layout_auto_align_discards_manual_positions() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = tmp.path().join("pinned.json");
    fs::write(
        &doc,
        r#"{"version":1,"people":[{"id":"only","position":{"x":5000.0,"y":5000.0}}]}"#,
    )
    .expect("write fixture");

    let exe = assert_cmd::cargo_bin!("banyan-cli");
    let assert = Command::new(exe)
        .args(["layout", "--auto-align", doc.to_string_lossy().as_ref()])
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert!(out["positions"]["only"]["x"].as_f64().unwrap() < 5000.0);
}

#[test]
fn cli_relate_reads_the_document_from_stdin() {
    let text = fs::read_to_string(fixture()).expect("read fixture");

    let exe = assert_cmd::cargo_bin!("banyan-cli");
    let assert = Command::new(exe)
        .args(["relate", "arun", "priya", "-"])
        .write_stdin(text)
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["english"], "Brother");
    assert_eq!(
        out["path"],
        serde_json::json!(["arun", "ravi", "priya"])
    );
}

#[test]
fn cli_check_cycle_rejects_a_grandchild_as_parent() {
    let exe = assert_cmd::cargo_bin!("banyan-cli");
    let assert = Command::new(exe)
        .args(["check-cycle", "ravi", "divya", fixture().to_string_lossy().as_ref()])
        .assert()
        .success();

    let out: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(out["wouldCreateCycle"], serde_json::Value::Bool(true));
}

#[test]
fn cli_rejects_bad_usage_with_exit_code_two() {
    let exe = assert_cmd::cargo_bin!("banyan-cli");
    Command::new(exe)
        .args(["relate", "only-one-id"])
        .assert()
        .code(2);
}

#[test]
fn cli_reports_malformed_documents_on_stderr() {
    let exe = assert_cmd::cargo_bin!("banyan-cli");
    let assert = Command::new(exe)
        .args(["layout", "-"])
        .write_stdin("not json")
        .assert()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("JSON"), "unexpected stderr: {stderr}");
}
