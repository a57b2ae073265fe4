use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary with a clean credential environment and `home` as $HOME.
fn snowy(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snowy"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("SNOWY_INSTANCE_URL")
        .env_remove("SNOWY_USERNAME")
        .env_remove("SNOWY_PASSWORD")
        .env_remove("SNOWY_LOG")
        .output()
        .expect("Failed to execute snowy")
}

#[test]
fn test_cli_help_command() {
    let home = TempDir::new().unwrap();
    let output = snowy(&home, &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("snowy"));
    assert!(stdout.contains("--delete"));
    assert!(stdout.contains("SNOWY_INSTANCE_URL"));
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let home = TempDir::new().unwrap();
    let output = snowy(&home, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let home = TempDir::new().unwrap();
    let output = snowy(&home, &["--bogus", "incident"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_credentials_exits_one() {
    let home = TempDir::new().unwrap();
    let output = snowy(&home, &["incident"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no credentials found"));
}

#[test]
fn test_short_default_auth_file_exits_one() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".snowy"), "https://dev1.service-now.com\nadmin\n").unwrap();

    let output = snowy(&home, &["incident"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("three non-empty lines"));
}

#[test]
fn test_completions_do_not_need_a_resource() {
    let home = TempDir::new().unwrap();
    let output = snowy(&home, &["--completions", "bash"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("snowy"));
}
