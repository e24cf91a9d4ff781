use std::process::{Command, Stdio};

use crate::common::{
    binary_path, make_temp_dir, normalized_lines, run_with_input, run_without_input,
    write_valid_config,
};

#[test]
fn main_exits_successfully_with_valid_config() {
    let dir = make_temp_dir("core");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "exit\n");
    assert!(output.status.success());
    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout.iter().any(|l| l.contains("P L A N G R I D")),
        "banner missing: {stdout:?}"
    );
}

#[test]
fn main_exits_at_end_of_input() {
    let dir = make_temp_dir("core");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "t\n");
    assert!(output.status.success());
}

#[test]
fn main_fails_when_config_missing() {
    let dir = make_temp_dir("core");
    let output = run_without_input(&dir);
    assert!(
        !output.status.success(),
        "expected failure when config is missing"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Configuration file"),
        "stderr did not mention missing config: {stderr}"
    );
}

#[test]
fn main_fails_when_config_is_malformed() {
    let dir = make_temp_dir("core");
    std::fs::write(dir.join("config.json"), "{ not json").unwrap();

    let output = run_without_input(&dir);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid JSON"),
        "stderr did not mention parse error: {stderr}"
    );
}

#[test]
fn main_fails_when_default_view_missing() {
    let dir = make_temp_dir("core");
    let cfg = r#"{ "snap_minutes": { "value": 15, "description": "snap" } }"#;
    std::fs::write(dir.join("config.json"), cfg).unwrap();

    let output = run_without_input(&dir);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("default_view"),
        "stderr did not mention missing key: {stderr}"
    );
}

#[test]
fn main_fails_on_unknown_cli_arg() {
    let dir = make_temp_dir("core");
    write_valid_config(&dir);
    let output = Command::new(binary_path())
        .current_dir(&dir)
        .arg("--nope")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown argument: --nope"),
        "stderr did not mention unknown argument: {stderr}"
    );
}

#[test]
fn main_fails_on_missing_cli_arg_value() {
    let dir = make_temp_dir("core");
    write_valid_config(&dir);
    let output = Command::new(binary_path())
        .current_dir(&dir)
        .arg("--events")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Missing value for --events"),
        "stderr did not mention missing value: {stderr}"
    );
}

#[test]
fn unknown_command_is_reported_and_session_continues() {
    let dir = make_temp_dir("core");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "fly\nhelp\nexit\n");
    assert!(output.status.success());

    let stderr = normalized_lines(&output.stderr);
    assert!(
        stderr
            .iter()
            .any(|l| l.contains("Unknown command: 'fly'")),
        "stderr: {stderr:?}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("down event <id> <date> <px>"));
}
