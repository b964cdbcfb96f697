use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fieldscan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fieldscan").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GOOGLE_API_KEY")
        .arg("--config")
        .arg(config_file(dir.path()));
    cmd
}

fn config_file(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    if !path.exists() {
        std::fs::write(&path, "{}").unwrap();
    }
    path
}

fn touch(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"not really an image").unwrap();
    path
}

#[test]
fn unsupported_extension_prints_usage() {
    let dir = TempDir::new().unwrap();
    let input = touch(&dir, "receipt.docx");

    fieldscan(&dir)
        .arg("auto")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Supported formats: .png, .jpg, .jpeg, .pdf"));
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();

    fieldscan(&dir)
        .args(["fields", "missing.png", "Total", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: missing.png"));
}

#[test]
fn missing_file_wins_over_bad_extension() {
    let dir = TempDir::new().unwrap();

    fieldscan(&dir)
        .args(["auto", "missing.docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn fields_requires_at_least_one_label() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "receipt.png");

    fieldscan(&dir)
        .args(["fields", "receipt.png", "out.csv"])
        .assert()
        .failure();
}

#[test]
fn hybrid_without_fields_fails() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "receipt.png");

    fieldscan(&dir)
        .args(["hybrid", "receipt.png", ",", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No fields provided"));
}

#[test]
fn hybrid_without_api_key_fails_before_ocr() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "receipt.PNG");

    fieldscan(&dir)
        .args(["hybrid", "receipt.PNG", "Total,Date", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));

    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn config_path_reports_status() {
    let dir = TempDir::new().unwrap();

    fieldscan(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();

    fieldscan(&dir)
        .args(["config", "set", "ocr.language", "deu"])
        .assert()
        .success();

    fieldscan(&dir)
        .args(["config", "get", "ocr.language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deu\""));

    fieldscan(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"gemini-2.0-flash\""));
}
