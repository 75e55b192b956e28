//! `milesync sync` end to end against a local mock of the GitHub API.
//!
//! The binary runs on `spawn_blocking` so the mock server keeps serving on
//! the async runtime.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mock_api(milestones: Value, labels: Value) -> MockServer {
    let server = MockServer::start().await;
    mount_get(&server, "/repos/octo/api", json!({ "id": 7, "full_name": "octo/api" })).await;
    mount_get(&server, "/repos/octo/api/milestones", milestones).await;
    mount_get(&server, "/repos/octo/api/labels", labels).await;
    mount_get(
        &server,
        "/rate_limit",
        json!({ "rate": { "limit": 5000, "remaining": 4990, "reset": 4102444800i64 } }),
    )
    .await;
    server
}

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, contents).expect("write config");
    path
}

fn sync_cmd(server: &MockServer, config: &Path, extra: &[&str]) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("milesync"));
    cmd.env_remove("CONFIG_FILE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("GITHUB_TOKEN", "test-token")
        .env("GITHUB_API_URL", server.uri())
        .arg("sync")
        .arg("--config")
        .arg(config)
        .args(extra);
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_up_to_date_repository_prints_summary_and_rate_limit() {
    let server = mock_api(json!([]), json!([])).await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_config(&dir, r#"[{ "Repositories": ["octo/api"] }]"#);

    let mut cmd = sync_cmd(&server, &config, &[]);
    tokio::task::spawn_blocking(move || {
        cmd.assert()
            .success()
            .stdout(contains("'octo/api' — nothing to do"))
            .stdout(contains("repository"))
            .stdout(contains("Finished."))
            .stdout(contains("Remaining 4990 of 5000 rate limit."));
    })
    .await
    .expect("blocking task");
}

#[tokio::test(flavor = "multi_thread")]
async fn dry_run_reports_pending_changes_and_sends_no_mutation() {
    let server = mock_api(
        json!([
            { "number": 3, "title": "backlog", "state": "open", "description": null }
        ]),
        json!([]),
    )
    .await;
    for verb in ["POST", "PATCH", "DELETE"] {
        Mock::given(method(verb))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
    }

    let dir = TempDir::new().expect("tempdir");
    let config = write_config(
        &dir,
        r#"[{
            "Repositories": ["octo/api"],
            "DeleteUnknownMilestones": true,
            "ExcludeMilestoneDeletion": ["backlog"],
            "Milestones": [{ "Title": "v1", "State": "open", "Description": "first" }],
            "Labels": [{ "Name": "bug", "Color": "d73a4a" }]
        }]"#,
    );

    let mut cmd = sync_cmd(&server, &config, &["--dry-run"]);
    tokio::task::spawn_blocking(move || {
        cmd.assert()
            .success()
            .stdout(contains("[dry-run] creating milestone"))
            .stdout(contains("milestone is excluded from deletion, skipping"))
            .stdout(contains("would create milestone 'v1'"))
            .stdout(contains("would create label 'bug'"))
            .stdout(contains("[dry-run] 2 changes pending"))
            .stdout(contains("Finished."))
            .stdout(contains("Remaining 4990 of 5000 rate limit."));
    })
    .await
    .expect("blocking task");

    let received = server.received_requests().await.expect("recording enabled");
    assert!(
        received.iter().all(|r| r.method.as_str() == "GET"),
        "dry run must only read"
    );
}
