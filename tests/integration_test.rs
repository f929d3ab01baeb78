// tests/integration_test.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_version-bumper"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn project(version: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pyproject.toml");
    fs::write(
        &path,
        format!("[project]\nname = \"demo\"\nversion = \"{version}\"\n"),
    )
    .unwrap();
    (dir, path)
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("version-bumper"));
    assert!(stdout.contains("bump"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_longhelp() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["--longhelp"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Parts: epoch, major, minor, patch"));
}

#[test]
fn test_get() {
    let (dir, _) = project("1.2.3");
    let output = run_cli(dir.path(), &["get"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "project.version: 1.2.3");
}

#[test]
fn test_bump_sequence() {
    let (dir, path) = project("1.2.2");
    let steps = [
        (vec!["bump", "patch"], "1.2.3"),
        (vec!["bump", "rc"], "1.2.3rc1"),
        (vec!["bump", "dev"], "1.2.3rc1.dev1"),
        (vec!["set", "local", "foo0100"], "1.2.3rc1.dev1+foo0100"),
        (vec!["bump", "local"], "1.2.3rc1.dev1+foo0101"),
        (vec!["release"], "1.2.3"),
    ];

    for (args, expected) in steps {
        let mut full = vec!["--text"];
        full.extend(args.iter().copied());
        let output = run_cli(dir.path(), &full);
        assert!(output.status.success(), "{args:?} failed");
        assert_eq!(stdout(&output).trim(), expected, "after {args:?}");
    }

    let text = fs::read_to_string(path).unwrap();
    assert!(text.contains("version = \"1.2.3\""));
    assert!(text.contains("name = \"demo\""));
}

#[test]
fn test_json_output() {
    let (dir, _) = project("1.2");
    let output = run_cli(dir.path(), &["--json", "set", "major", "2", "--clear-right"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), r#"{"version":"2.0"}"#);
}

#[test]
fn test_explicit_pyproject_path() {
    let (dir, _) = project("0.1.0");
    let elsewhere = TempDir::new().unwrap();
    let path = dir.path().join("pyproject.toml");
    let output = run_cli(
        elsewhere.path(),
        &["--text", "--pyproject", path.to_str().unwrap(), "bump", "minor"],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "0.2.0");
}

#[test]
fn test_version_silent() {
    let (dir, path) = project("0.1.0");
    let output = run_cli(dir.path(), &["version", "3.0.0", "--silent"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(fs::read_to_string(path).unwrap().contains("version = \"3.0.0\""));
}

#[test]
fn test_invalid_part_exit_code() {
    let (dir, _) = project("1.2.3");
    let output = run_cli(dir.path(), &["bump", "foobar"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid part value: foobar"));
}

#[test]
fn test_invalid_version_exit_code() {
    let (dir, _) = project("1.2.3");
    let output = run_cli(dir.path(), &["version", "1.2.3."]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid version string: 1.2.3."));
}

#[test]
fn test_missing_pyproject_exit_code() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["get"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_file_in_current_directory() {
    let (dir, _) = project("4.5.6");
    fs::write(
        dir.path().join("version_bumper.toml"),
        "[output]\nformat = \"text\"\n",
    )
    .unwrap();
    let output = run_cli(dir.path(), &["get"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "4.5.6");
}

#[test]
fn test_save_config() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        dir.path(),
        &["--json", "--save-config-as", "saved.toml"],
    );

    assert!(output.status.success());
    let saved = fs::read_to_string(dir.path().join("saved.toml")).unwrap();
    assert!(saved.contains("format = \"json\""));
}

#[test]
fn test_save_config_writes_back_to_loaded_file() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("version_bumper.toml");
    fs::write(&local, "[output]\nformat = \"text\"\n").unwrap();

    let output = run_cli(dir.path(), &["--json", "--save-config"]);

    assert!(output.status.success());
    let saved = fs::read_to_string(&local).unwrap();
    assert!(saved.contains("format = \"json\""));
}

#[test]
fn test_logfile() {
    let (dir, _) = project("1.2.3");
    let output = run_cli(
        dir.path(),
        &["--loglevel", "info", "--logfile", "logs/bumper.log", "bump", "minor"],
    );

    assert!(output.status.success());
    let log = fs::read_to_string(dir.path().join("logs").join("bumper.log")).unwrap();
    assert!(log.contains("saved pyproject"));
    assert!(!log.contains("\u{1b}["));
}
