use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on the discard port, so any request fails fast.
const DEAD_API: &str = "http://127.0.0.1:9/api";

fn medidir() -> Command {
    let mut cmd = Command::cargo_bin("medidir").unwrap();
    cmd.env_remove("MEDIDIR_API_URL")
        .env_remove("MEDIDIR_PAGE_SIZE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_resources() {
    medidir()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("doctors"))
        .stdout(predicate::str::contains("hospitals"))
        .stdout(predicate::str::contains("institutes"));
}

#[test]
fn test_page_zero_is_rejected_before_any_request() {
    medidir()
        .args(["--no-keyring", "--api-url", DEAD_API])
        .args(["doctors", "list", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page numbers start at 1"));
}

#[test]
fn test_oversized_page_size_is_rejected() {
    medidir()
        .args(["--no-keyring", "--api-url", DEAD_API])
        .args(["hospitals", "list", "--size", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page size 500"));
}

#[test]
fn test_unknown_tab_is_a_usage_error() {
    medidir()
        .args(["hospitals", "show", "5", "--tab", "nurses"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unreachable_server_reports_failed_load() {
    medidir()
        .args(["--no-keyring", "--api-url", DEAD_API])
        .args(["doctors", "list", "--name", "Sarah"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load doctors"));
}

#[test]
fn test_auth_status_without_token_makes_no_request() {
    medidir()
        .args(["--no-keyring", "--api-url", DEAD_API, "auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_config_set_then_show() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().to_str().unwrap();

    medidir()
        .args(["--config-dir", config_dir, "--api-url", "http://directory.test/api"])
        .args(["config", "set", "--page-size", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved successfully."));

    medidir()
        .args(["--config-dir", config_dir, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://directory.test/api"))
        .stdout(predicate::str::contains("Page size:   25"));
}

#[test]
fn test_config_set_requires_a_value() {
    let dir = tempdir().unwrap();
    medidir()
        .args(["--config-dir", dir.path().to_str().unwrap(), "config", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is missing"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rejects_zero_page_size() {
    let dir = tempdir().unwrap();
    medidir()
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .args(["config", "set", "--page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration value for 'page_size'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_hospital_prints_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hospitals/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;
    let api = format!("{}/api", server.uri());

    medidir()
        .args(["--no-keyring", "--api-url", &api, "hospitals", "show", "77"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hospital not found"))
        .stdout(predicate::str::contains("Back to /hospitals"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_doctor_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/doctors/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let api = format!("{}/api", server.uri());

    medidir()
        .args(["--no-keyring", "--api-url", &api])
        .args(["doctors", "show", "404", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"backLink\": \"/doctors\""));
}

#[test]
fn test_zero_id_renders_empty_state_without_request() {
    medidir()
        .args(["--no-keyring", "--api-url", DEAD_API, "institutes", "show", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}
