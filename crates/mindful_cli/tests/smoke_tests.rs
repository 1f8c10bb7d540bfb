//! CLI smoke tests: basic binary behavior.

use std::io::Write;
use std::process::{Command, Stdio};

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mindful"));
    cmd.env_remove("MINDFUL_MODEL")
        .env_remove("MINDFUL_API_URL")
        .env_remove("MINDFUL_CONFIG");
    cmd
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mindful"), "Expected binary name in --version output");
}

#[test]
fn test_missing_required_config_is_fatal() {
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_mindful_config_12345.toml")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("model"),
        "Expected the missing option to be named, got: {}",
        stderr
    );
}

#[test]
fn test_exit_command_ends_session() {
    let mut child = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_mindful_config_12345.toml")
        .arg("--model")
        .arg("mental-health-ai")
        .arg("--api-url")
        .arg("http://127.0.0.1:9/api/generate")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"help\nexit\n")
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("'clear': reset the conversation"));
    assert!(stdout.contains("Remember to be kind to yourself"));
}
