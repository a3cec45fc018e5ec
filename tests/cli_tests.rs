use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Nothing listens here, so any request that gets sent fails to connect.
const UNREACHABLE_URL: &str = "http://127.0.0.1:9/graphql";

/// Command isolated from the developer's environment: no `.env`, no
/// settings file, no `LINEAR_*` variables unless a test sets them.
fn linear_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linear-analytics"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("LINEAR_API_KEY")
        .env_remove("LINEAR_API_URL")
        .env_remove("LINEAR_DEFAULT_TEAM")
        .env_remove("LINEAR_CAPITALIZATION_LABELS")
        .env_remove("LINEAR_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Configured with a key and an endpoint that refuses connections.
fn offline_cmd(dir: &TempDir) -> Command {
    let mut cmd = linear_cmd(dir);
    cmd.env("LINEAR_API_KEY", "lin_api_test")
        .env("LINEAR_API_URL", UNREACHABLE_URL);
    cmd
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Linear workspace"))
        .stdout(predicate::str::contains("--allow-mutations"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linear-analytics"));
}

#[test]
fn test_analytics_help_lists_reports() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .args(["analytics", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("capitalization"))
        .stdout(predicate::str::contains("workload"));
}

#[test]
fn test_unknown_format_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .args(["analytics", "report", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_missing_api_key_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .args(["teams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LINEAR_API_KEY"));
}

#[test]
fn test_blank_api_key_counts_as_missing() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .env("LINEAR_API_KEY", "   ")
        .args(["teams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LINEAR_API_KEY"));
}

#[test]
fn test_api_key_from_dotenv_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        format!("LINEAR_API_KEY=lin_api_dotenv\nLINEAR_API_URL={}\n", UNREACHABLE_URL),
    )
    .unwrap();

    // Key is found, so the failure comes from the network instead
    linear_cmd(&dir)
        .args(["teams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transport error"))
        .stderr(predicate::str::contains("LINEAR_API_KEY").not());
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .env("LINEAR_API_KEY", "lin_api_test")
        .env("LINEAR_API_URL", "ftp://example.com/graphql")
        .args(["teams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_settings_file_is_read() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, format!("[api]\nurl = \"{}\"\n", UNREACHABLE_URL)).unwrap();

    linear_cmd(&dir)
        .env("LINEAR_API_KEY", "lin_api_test")
        .arg("--config")
        .arg(&settings)
        .args(["teams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transport error"));
}

#[test]
fn test_malformed_settings_file() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, "[api\nurl = ").unwrap();

    linear_cmd(&dir)
        .env("LINEAR_API_KEY", "lin_api_test")
        .arg("--config")
        .arg(&settings)
        .args(["teams", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

// =============================================================================
// Validation happens before any request
// =============================================================================

#[test]
fn test_view_rejects_malformed_issue_id() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["issues", "view", "ENG123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid issue ID"))
        .stderr(predicate::str::contains("Transport error").not());
}

#[test]
fn test_create_rejects_out_of_range_priority() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args([
            "--allow-mutations",
            "issues",
            "create",
            "--title",
            "Fix login",
            "--team",
            "Engineering",
            "--priority",
            "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Priority"))
        .stderr(predicate::str::contains("Transport error").not());
}

#[test]
fn test_create_requires_a_team() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["--allow-mutations", "issues", "create", "--title", "Fix login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LINEAR_DEFAULT_TEAM"));
}

#[test]
fn test_update_requires_a_field() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["--allow-mutations", "issues", "update", "ENG-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_comment_rejects_empty_stdin() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["--allow-mutations", "issues", "comment", "ENG-1"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Comment cannot be empty"));
}

#[test]
fn test_query_rejects_non_object_variables() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["query", "query { viewer { id } }", "--variables", "[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

// =============================================================================
// Safe mode
// =============================================================================

#[test]
fn test_raw_mutation_blocked_by_default() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["query", "mutation ArchiveIssue { issueArchive(id: \"x\") { success } }"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ArchiveIssue"))
        .stderr(predicate::str::contains("--allow-mutations"))
        .stderr(predicate::str::contains("Transport error").not());
}

#[test]
fn test_environment_cannot_disable_safe_mode() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .env("LINEAR_ALLOW_MUTATIONS", "true")
        .env("ALLOW_MUTATIONS", "true")
        .args(["query", "mutation ArchiveIssue { issueArchive(id: \"x\") { success } }"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mutation blocked"))
        .stderr(predicate::str::contains("Transport error").not());
}

#[test]
fn test_help_does_not_advertise_env_override() {
    let dir = TempDir::new().unwrap();
    linear_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LINEAR_ALLOW_MUTATIONS").not());
}

#[test]
fn test_raw_mutation_after_comment_is_still_blocked() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["query", "# archive it\n\nmutation { issueArchive(id: \"x\") { success } }"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--allow-mutations"));
}

#[test]
fn test_raw_mutation_sent_when_allowed() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args([
            "--allow-mutations",
            "query",
            "mutation { issueArchive(id: \"x\") { success } }",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transport error"));
}

#[test]
fn test_create_blocked_before_lookups() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["issues", "create", "--title", "Fix login", "--team", "Engineering"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CreateIssue"))
        .stderr(predicate::str::contains("Transport error").not());
}

#[test]
fn test_generate_blocked_by_default() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["generate", "--team", "Engineering", "--count", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--allow-mutations"));
}

#[test]
fn test_read_query_is_sent_in_safe_mode() {
    let dir = TempDir::new().unwrap();
    offline_cmd(&dir)
        .args(["query", "query { viewer { id } }"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transport error"));
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_log_file_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");

    offline_cmd(&dir)
        .arg("--log-file")
        .arg(log_dir.join("linear.log"))
        .args(["query", "mutation { issueArchive(id: \"x\") { success } }"])
        .assert()
        .failure();

    assert!(log_dir.is_dir());
}
