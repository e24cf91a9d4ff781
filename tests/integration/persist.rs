use std::fs;

use plangrid::core::store::EventStore;

use crate::common::{
    build_context, make_temp_dir, normalized_lines, run_with_input, run_without_input,
    write_events, write_valid_config,
};

#[test]
fn quick_add_writes_events_file() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);

    let output = run_with_input(&dir, "goto 2025-01-06\nclick 2025-01-06 500\nadd Review\nexit\n");
    assert!(output.status.success());

    let saved = fs::read_to_string(dir.join("events.json")).expect("events.json written");
    assert!(saved.contains("\"title\": \"Review\""), "saved: {saved}");
    assert!(saved.contains("2025-01-06T10:00:00"), "saved: {saved}");
    assert!(saved.contains("2025-01-06T11:00:00"), "saved: {saved}");
}

#[test]
fn existing_events_are_loaded_at_startup() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    write_events(
        &dir,
        r#"{ "events": [
          { "id": 4, "title": "Dentist", "start": "2025-01-08T14:00:00", "end": "2025-01-08T15:00:00" }
        ] }"#,
    );

    let ctx = build_context(&dir);
    let dentist = ctx.store.get(4).unwrap();
    assert_eq!(dentist.title, "Dentist");
    assert_eq!(ctx.store.len(), 1);
}

#[test]
fn new_events_take_the_next_free_id() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    write_events(
        &dir,
        r#"{ "events": [
          { "id": 4, "title": "Dentist", "start": "2025-01-08T14:00:00", "end": "2025-01-08T15:00:00" }
        ] }"#,
    );

    let output = run_with_input(&dir, "goto 2025-01-06\nclick 2025-01-07 450\nadd Lunch\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout.iter().any(|l| l.starts_with("Saved Event(id=5")),
        "stdout: {stdout:?}"
    );
    let ctx = build_context(&dir);
    assert_eq!(ctx.store.get(5).unwrap().title, "Lunch");
}

#[test]
fn event_ending_before_start_fails_startup() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    write_events(
        &dir,
        r#"{ "events": [
          { "id": 1, "title": "Backwards", "start": "2025-01-08T15:00:00", "end": "2025-01-08T14:00:00" }
        ] }"#,
    );

    let output = run_without_input(&dir);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Event 'Backwards' ends before it starts"),
        "stderr: {stderr}"
    );
}
