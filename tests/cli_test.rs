//! End-to-end tests for the casegen binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Binary isolated from the developer's environment and home directory
fn casegen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("casegen").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("GOOGLE_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, base_url: &str) {
    fs::write(
        dir.join("casegen.toml"),
        format!("[model]\nname = \"test-model\"\nbase_url = \"{base_url}\"\n"),
    )
    .unwrap();
}

fn sse(texts: &[&str]) -> String {
    texts
        .iter()
        .map(|text| {
            format!(
                "data: {}\n\n",
                serde_json::json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
            )
        })
        .collect()
}

#[test]
fn test_generate_without_api_key_fails() {
    let dir = TempDir::new().unwrap();

    casegen(dir.path())
        .args(["generate", "--id", "REQ-045", "--text", "search by last name"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "API key not found. Please add it to your secrets.",
        ));
}

#[test]
fn test_prompt_needs_no_api_key() {
    let dir = TempDir::new().unwrap();

    casegen(dir.path())
        .args(["prompt", "--id", "REQ-045", "--text", "As a doctor, I want to search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("REQ-045"))
        .stdout(predicate::str::contains("As a doctor, I want to search"))
        .stdout(predicate::str::contains("{req_id}").not());
}

#[test]
fn test_prompt_uses_custom_template() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.md"), "ID={req_id} TEXT={req_text}").unwrap();
    fs::write(
        dir.path().join("casegen.toml"),
        "[prompt]\ntemplate_path = \"custom.md\"\n",
    )
    .unwrap();

    casegen(dir.path())
        .args(["prompt", "--id", "R-1", "--text", "hello"])
        .assert()
        .success()
        .stdout("ID=R-1 TEXT=hello\n");
}

#[test]
fn test_samples_lists_requirements() {
    let dir = TempDir::new().unwrap();

    casegen(dir.path())
        .arg("samples")
        .assert()
        .success()
        .stdout(predicate::str::contains("search for a patient by their last name"))
        .stdout(predicate::str::contains("HIPAA-compliant audit trail"));
}

#[test]
fn test_config_prints_and_writes_sample() {
    let dir = TempDir::new().unwrap();

    casegen(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[model]"))
        .stdout(predicate::str::contains("gemini-1.5-flash-latest"));

    casegen(dir.path())
        .args(["config", "--output", "casegen.toml"])
        .assert()
        .success();
    assert!(dir.path().join("casegen.toml").is_file());

    casegen(dir.path())
        .args(["config", "--output", "casegen.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    casegen(dir.path())
        .args(["config", "--output", "casegen.toml", "--force"])
        .assert()
        .success();
}

#[test]
fn test_generate_streams_output_to_stdout() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/test-model:streamGenerateContent?alt=sse")
        .match_header("x-goog-api-key", "test-key-123456")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&["Hello, ", "world"]))
        .create();
    write_config(dir.path(), &server.url());

    casegen(dir.path())
        .env("GOOGLE_API_KEY", "test-key-123456")
        .args(["generate", "--id", "REQ-045", "--text", "search by last name"])
        .assert()
        .success()
        .stdout("Hello, world\n")
        .stderr(predicate::str::contains("API key configured successfully!"));

    mock.assert();
}

#[test]
fn test_generate_reads_key_from_secrets_file() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/test-model:streamGenerateContent?alt=sse")
        .match_header("x-goog-api-key", "secret-file-key")
        .with_status(200)
        .with_body(sse(&["ok"]))
        .create();
    write_config(dir.path(), &server.url());
    fs::create_dir_all(dir.path().join(".streamlit")).unwrap();
    fs::write(
        dir.path().join(".streamlit/secrets.toml"),
        "GOOGLE_API_KEY = \"secret-file-key\"\n",
    )
    .unwrap();

    casegen(dir.path())
        .args(["generate", "--id", "REQ-1", "--text", "text"])
        .assert()
        .success()
        .stdout("ok\n");

    mock.assert();
}

#[test]
fn test_generate_reads_text_file() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/test-model:streamGenerateContent?alt=sse")
        .match_body(mockito::Matcher::Regex("immutable audit trail".to_string()))
        .with_status(200)
        .with_body(sse(&["done"]))
        .create();
    write_config(dir.path(), &server.url());
    fs::write(dir.path().join("req.txt"), "Log access in an immutable audit trail.\n").unwrap();

    casegen(dir.path())
        .env("GOOGLE_API_KEY", "test-key-123456")
        .args(["generate", "--id", "REQ-2", "--text-file", "req.txt"])
        .assert()
        .success()
        .stdout("done\n");

    mock.assert();
}

#[test]
fn test_generate_rejects_empty_identifier() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create();
    write_config(dir.path(), &server.url());

    casegen(dir.path())
        .env("GOOGLE_API_KEY", "test-key-123456")
        .args(["generate", "--id", "", "--text", "some text"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Error: Requirement ID and Text cannot be empty.",
        ));

    mock.assert();
}

#[test]
fn test_generate_reports_api_failure() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/models/test-model:streamGenerateContent?alt=sse")
        .with_status(500)
        .with_body(r#"{"error":{"code":500,"message":"Internal error encountered."}}"#)
        .create();
    write_config(dir.path(), &server.url());

    casegen(dir.path())
        .env("GOOGLE_API_KEY", "test-key-123456")
        .args(["generate", "--id", "REQ-1", "--text", "text"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "An error occurred: API error (500): Internal error encountered.",
        ));
}

#[test]
fn test_interactive_requires_terminal() {
    let dir = TempDir::new().unwrap();

    casegen(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive mode needs a terminal"));
}
