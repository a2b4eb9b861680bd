//! Integration tests for CLI functionality

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get path to compiled binary
fn osc_bin() -> &'static Path {
    assert_cmd::cargo::cargo_bin!("osc")
}

/// Command isolated from the caller's HOME, config and cwd
fn osc(home: &Path) -> Command {
    let mut cmd = Command::new(osc_bin());
    cmd.env("HOME", home)
        .env_remove("OSC_CONFIG")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

/// Run osc off the async runtime so the mock server keeps serving
async fn run_osc(home: &Path, args: &[&str]) -> Output {
    let home = home.to_path_buf();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || osc(&home).args(&args).output().unwrap())
        .await
        .unwrap()
}

fn write_profiles(home: &Path, yaml: &str) {
    fs::write(home.join("osc.config.yaml"), yaml).unwrap();
}

fn cluster_file(home: &Path) -> PathBuf {
    home.join(".config/sensu/sensuctl/cluster")
}

fn profile_file(home: &Path) -> PathBuf {
    home.join(".config/sensu/sensuctl/profile")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

async fn backend(probe_status: u16) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/test"))
        .respond_with(ResponseTemplate::new(probe_status))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "expires_at": 1234,
            "refresh_token": "r"
        })))
        .mount(&mock_server)
        .await;
    mock_server
}

/// Test that help flag works
#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    osc(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage configured sensuctl clusters"))
        .stdout(predicate::str::contains("connect"))
        .stdout(predicate::str::contains("list"));
}

/// Test that version flag works
#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    osc(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("osc"));
}

#[test]
fn test_connect_unknown_profile_exits_1() {
    let home = TempDir::new().unwrap();
    write_profiles(home.path(), "prod:\n  api: https://x.test\n");

    osc(home.path())
        .args(["connect", "dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config profile (dev) does not exist."));

    assert!(!cluster_file(home.path()).exists());
}

#[test]
fn test_connect_profile_without_api_exits_1() {
    let home = TempDir::new().unwrap();
    write_profiles(home.path(), "prod:\n  username: u\n  password: p\n");

    osc(home.path())
        .args(["connect", "prod"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_connect_without_profile_store_fails() {
    let home = TempDir::new().unwrap();
    osc(home.path())
        .args(["connect", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("osc.config"));
}

#[test]
fn test_connect_without_name_off_terminal_fails() {
    let home = TempDir::new().unwrap();
    write_profiles(home.path(), "prod:\n  api: https://x.test\n");

    osc(home.path())
        .arg("connect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available profiles: prod"));
}

#[test]
fn test_list_without_session_or_store() {
    let home = TempDir::new().unwrap();
    osc(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unable to read sensuctl"))
        .stdout(predicate::str::contains("Profile"));
}

#[test]
fn test_list_shows_profiles_from_explicit_config() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("elsewhere.yaml");
    fs::write(
        &config,
        "prod:\n  api: https://prod.test\n  username: admin\n  env: production\n",
    )
    .unwrap();

    osc(home.path())
        .args(["list", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://prod.test"))
        .stdout(predicate::str::contains("production"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_malformed_profile_is_listed_and_refused() {
    let home = TempDir::new().unwrap();
    write_profiles(
        home.path(),
        "prod:\n  api: https://prod.test\ndev:\n  api: https://dev.test\n  timeout: soon\n",
    );

    osc(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://prod.test"))
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("(invalid)"));

    osc(home.path())
        .args(["connect", "dev"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid profile 'dev'"));
    assert!(!cluster_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_ignores_malformed_sibling_profile() {
    let mock_server = backend(200).await;
    let home = TempDir::new().unwrap();
    write_profiles(
        home.path(),
        &format!(
            "prod:\n  api: {}\ndev:\n  insecure: true\n  insecure-skip-tls-verify: false\n",
            mock_server.uri()
        ),
    );

    let output = run_osc(home.path(), &["connect", "prod"]).await;
    assert_eq!(output.status.code(), Some(0));
    assert!(cluster_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_writes_sensuctl_files() {
    let mock_server = backend(200).await;
    let home = TempDir::new().unwrap();
    write_profiles(
        home.path(),
        &format!(
            "prod:\n  api: {}\n  username: u\n  password: p\n",
            mock_server.uri()
        ),
    );

    let output = run_osc(home.path(), &["connect", "prod"]).await;
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!(
        "Connected to Sensu backend: prod ({})",
        mock_server.uri()
    )));

    let cluster: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(cluster_file(home.path())).unwrap()).unwrap();
    assert_eq!(
        cluster,
        serde_json::json!({
            "api-url": mock_server.uri(),
            "trusted-ca-file": "",
            "insecure-skip-tls-verify": false,
            "access_token": "tok",
            "expires_at": 1234,
            "refresh_token": "r",
            "timeout": 15_000_000_000u64
        })
    );
    let profile: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(profile_file(home.path())).unwrap()).unwrap();
    assert_eq!(
        profile,
        serde_json::json!({"format": "tabular", "namespace": "default"})
    );

    // list picks up the new session and marks the profile
    let output = run_osc(home.path(), &["list"]).await;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Active Config"));
    assert!(stdout.contains(&format!("API: {}", mock_server.uri())));
    assert!(stdout.contains("Namespace: default"));
    assert!(stdout
        .lines()
        .any(|l| l.contains('*') && l.contains("prod")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_auth_failure_writes_nothing() {
    let mock_server = backend(401).await;
    let home = TempDir::new().unwrap();
    write_profiles(
        home.path(),
        &format!("prod:\n  api: {}\n  username: u\n  password: bad\n", mock_server.uri()),
    );

    let output = run_osc(home.path(), &["connect", "prod"]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Auth failed!"));
    assert!(!cluster_file(home.path()).exists());
    assert!(!profile_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_non_ca_file_fails_before_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    write_profiles(
        home.path(),
        &format!(
            "prod:\n  api: {}\n  trusted-ca-file: {}\n",
            mock_server.uri(),
            fixture("leaf.pem").display()
        ),
    );

    let output = run_osc(home.path(), &["connect", "prod"]).await;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a CA"));
    assert!(!stderr.contains("Auth failed"));
    assert!(!cluster_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_strict_token_exchange() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    write_profiles(home.path(), &format!("prod:\n  api: {}\n", mock_server.uri()));

    let output = run_osc(home.path(), &["connect", "prod", "--strict-token-exchange"]).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Token exchange failed"));
    assert!(!cluster_file(home.path()).exists());

    // Without the flag the session is written without tokens
    let output = run_osc(home.path(), &["connect", "prod"]).await;
    assert!(output.status.success());
    let cluster: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(cluster_file(home.path())).unwrap()).unwrap();
    assert_eq!(cluster["access_token"], "");
}
