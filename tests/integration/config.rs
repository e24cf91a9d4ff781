use std::fs;

use crate::common::{
    make_temp_dir, normalized_lines, read_log_contents, run_with_input, write_config,
    write_valid_config,
};

#[test]
fn config_command_lists_every_key() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);

    let output = run_with_input(&dir, "config\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(stdout.iter().any(|l| l == "CONFIG"), "stdout: {stdout:?}");
    for key in [
        "DEFAULT_VIEW",
        "PIXELS_PER_HOUR",
        "SNAP_MINUTES",
        "QUICK_ADD_MINUTES",
        "MONTH_CELL_LIMIT",
        "FILE_LOGGING_ENABLED",
    ] {
        assert!(
            stdout.iter().any(|l| l.starts_with(key)),
            "missing {key} in {stdout:?}"
        );
    }
}

#[test]
fn set_persists_to_config_file() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);

    let output = run_with_input(&dir, "set SNAP_MINUTES 30\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout.iter().any(|l| l == "SNAP_MINUTES set to 30."),
        "stdout: {stdout:?}"
    );

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("config.json")).unwrap()).unwrap();
    assert_eq!(saved["snap_minutes"]["value"], 30);
    assert_eq!(saved["snap_minutes"]["description"], "Snap step");
}

#[test]
fn invalid_setting_is_reported_and_logged() {
    let dir = make_temp_dir("config");
    write_valid_config(&dir);

    let output = run_with_input(&dir, "set BOGUS 1\nexit\n");
    assert!(output.status.success());

    let stderr = normalized_lines(&output.stderr);
    assert!(
        stderr
            .iter()
            .any(|l| l.contains("Unknown configuration key 'BOGUS'")),
        "stderr: {stderr:?}"
    );
    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Command failed for 'set BOGUS 1'"));
}

#[test]
fn file_logging_disabled_writes_no_log() {
    let dir = make_temp_dir("config");
    write_config(&dir, "week", false);

    let output = run_with_input(&dir, "t\nexit\n");
    assert!(output.status.success());
    assert!(read_log_contents(&dir).is_none());
}
