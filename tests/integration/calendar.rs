use plangrid::core::store::EventStore;

use crate::common::{
    build_context, make_temp_dir, normalized_lines, read_log_contents, run_with_input,
    write_events, write_valid_config,
};

const STANDUP: &str = r#"{ "events": [
  {
    "id": 1,
    "title": "Standup",
    "start": "2025-01-06T09:00:00",
    "end": "2025-01-06T09:30:00",
    "category": "Meeting",
    "recurrence": { "rule": "FREQ=WEEKLY;BYDAY=MO,WE" }
  }
] }"#;

#[test]
fn week_view_lists_recurring_occurrences() {
    let dir = make_temp_dir("calendar");
    write_valid_config(&dir);
    write_events(&dir, STANDUP);

    let output = run_with_input(&dir, "goto 2025-01-13\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout.iter().any(|l| l == "WEEK OF 2025-01-12"),
        "stdout: {stdout:?}"
    );
    assert!(stdout.iter().any(|l| l == "OCCURRENCES"));
    assert!(stdout.iter().any(|l| l.contains("2025-01-13 09:00")));
    assert!(stdout.iter().any(|l| l.contains("2025-01-15 09:00")));
}

#[test]
fn dragging_an_instance_moves_the_series() {
    let dir = make_temp_dir("calendar");
    write_valid_config(&dir);
    write_events(&dir, STANDUP);

    // Wednesday 2025-01-15 09:00 is 1736931600000 ms after the epoch.
    let input = "goto 2025-01-13\n\
                 down event 1_1736931600000 2025-01-15 460\n\
                 move 2025-01-16 500\n\
                 up 2025-01-16 510\n\
                 exit\n";
    let output = run_with_input(&dir, input);
    assert!(output.status.success());

    let ctx = build_context(&dir);
    let series = ctx.store.get(1).unwrap();
    assert_eq!(series.start.to_string(), "2025-01-16 10:00:00");
    assert_eq!(series.end.to_string(), "2025-01-16 10:30:00");
    assert!(series.recurrence.is_some());
}

#[test]
fn month_view_caps_cells() {
    let dir = make_temp_dir("calendar");
    write_valid_config(&dir);
    write_events(
        &dir,
        r#"{ "events": [
          { "id": 1, "title": "A", "start": "2025-01-15T08:00:00", "end": "2025-01-15T09:00:00" },
          { "id": 2, "title": "B", "start": "2025-01-15T10:00:00", "end": "2025-01-15T11:00:00" },
          { "id": 3, "title": "C", "start": "2025-01-15T12:00:00", "end": "2025-01-15T13:00:00" },
          { "id": 4, "title": "D", "start": "2025-01-15T14:00:00", "end": "2025-01-15T15:00:00" }
        ] }"#,
    );

    let output = run_with_input(&dir, "m\ngoto 2025-01-15\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout.iter().any(|l| l == "JANUARY 2025"),
        "stdout: {stdout:?}"
    );
    assert!(stdout.iter().any(|l| l.contains("+1 more")));
}

#[test]
fn log_command_prints_recent_history() {
    let dir = make_temp_dir("calendar");
    write_valid_config(&dir);

    let output = run_with_input(&dir, "goto 2025-01-13\nlog\nexit\n");
    assert!(output.status.success());

    let stdout = normalized_lines(&output.stdout);
    assert!(
        stdout
            .iter()
            .any(|l| l.contains("Command run: goto 2025-01-13")),
        "stdout: {stdout:?}"
    );
    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Session started with 0 stored events"));
}
