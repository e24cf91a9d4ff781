mod interaction_tests;

use crate::calendar::view_window::ViewWindow;
use crate::core::models::{BaseEvent, EventOccurrence};
use crate::logging::Logger;
use chrono::{NaiveDate, NaiveDateTime};

pub(super) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// 2025-01-06 is a Monday; its week starts Sunday 2025-01-05.
pub(super) fn monday() -> NaiveDate {
    day(2025, 1, 6)
}

pub(super) fn event(id: i32, title: &str, start: NaiveDateTime, end: NaiveDateTime) -> BaseEvent {
    let mut e = BaseEvent::new(title, start, end);
    e.id = id;
    e
}

pub(super) fn occurrence(id: i32, start: NaiveDateTime, end: NaiveDateTime) -> EventOccurrence {
    EventOccurrence::from_base(&event(id, &format!("event {id}"), start, end))
}

pub(super) fn window(start: NaiveDate, end: NaiveDate) -> ViewWindow {
    ViewWindow {
        start: start.and_hms_opt(0, 0, 0).unwrap(),
        end: end.and_hms_opt(0, 0, 0).unwrap(),
    }
}

/// History-only logger; nothing is written to disk.
pub(super) fn quiet_logger() -> Logger {
    let logger = Logger::new();
    logger.set_file_logging_enabled(false);
    logger
}
