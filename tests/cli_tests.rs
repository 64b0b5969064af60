//! End-to-end runs of the cliptrim binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn cliptrim(store: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cliptrim").unwrap();
    cmd.arg("--store").arg(store.path().join("trims.json"));
    cmd
}

fn stdout_json(output: std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_catalog(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{"items": [
            {"id": {"videoId": "v1"}, "snippet": {"title": "Cat show", "description": ""}},
            {"id": {"videoId": "v2"}, "snippet": {"title": "Dog walk", "description": ""}}
        ]}"#,
    )
    .unwrap();
    path
}

#[test]
fn test_catalog_without_page_fails() {
    let dir = TempDir::new().unwrap();
    cliptrim(&dir)
        .arg("catalog")
        .arg("--data")
        .arg(write_catalog(&dir))
        .assert()
        .failure()
        .stdout(predicate::str::contains("no page parameter"));
}

#[test]
fn test_catalog_page_printed_as_json() {
    let dir = TempDir::new().unwrap();
    let output = cliptrim(&dir)
        .args(["catalog", "--page", "1", "--query", "dog", "--data"])
        .arg(write_catalog(&dir))
        .output()
        .unwrap();
    assert!(output.status.success());

    let page = stdout_json(output);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["items"][0]["id"], "v2");
}

#[test]
fn test_trim_defaults_to_full_range() {
    let dir = TempDir::new().unwrap();
    let output = cliptrim(&dir).args(["trim", "--clip", "fresh"]).output().unwrap();
    assert!(output.status.success());

    let window = stdout_json(output);
    assert_eq!(window["start"], 0.0);
    assert_eq!(window["end"], 100.0);
}

#[test]
fn test_drag_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    cliptrim(&dir)
        .args(["drag", "--clip", "v1", "--boundary", "start", "--to", "30"])
        .assert()
        .success();
    cliptrim(&dir)
        .args(["drag", "--clip", "v1", "--boundary", "end", "--to", "10"])
        .assert()
        .success();

    let output = cliptrim(&dir).args(["trim", "--clip", "v1"]).output().unwrap();
    let window = stdout_json(output);
    assert_eq!(window["clip"], "v1");
    assert_eq!(window["start"], 30.0);
    assert_eq!(window["end"], 31.0);
}

#[test]
fn test_store_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("env-trims.json");
    Command::cargo_bin("cliptrim")
        .unwrap()
        .env("CLIPTRIM_TRIM_STORE_PATH", &store)
        .args(["drag", "--clip", "v9", "--boundary", "end", "--to", "75"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&store).unwrap();
    assert!(saved.contains("trimEnd-v9"));
}

#[test]
fn test_bad_boundary_rejected() {
    let dir = TempDir::new().unwrap();
    cliptrim(&dir)
        .args(["drag", "--clip", "v1", "--boundary", "middle", "--to", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid boundary"));
}

#[test]
fn test_play_reports_session() {
    let dir = TempDir::new().unwrap();
    let output = cliptrim(&dir)
        .args([
            "play", "--clip", "v1", "--duration", "200", "--seconds", "0.5", "--speed", "10",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report = stdout_json(output);
    assert_eq!(report["phase"], "ready");
    assert_eq!(report["session"]["duration"], 200.0);
    assert_eq!(report["trim"]["start"], 0.0);
}
