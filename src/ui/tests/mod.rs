
use crate::calendar::CalendarEngine;
use crate::calendar::CalendarSnapshot;
use crate::calendar::navigation::CalendarNav;
use crate::core::models::BaseEvent;
use crate::core::types::ViewMode;
use crate::logging::Logger;
use chrono::{NaiveDate, NaiveDateTime};

pub(super) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub(super) fn snapshot(mode: ViewMode, anchor: NaiveDate, events: &[BaseEvent]) -> CalendarSnapshot {
    let logger = Logger::new();
    logger.set_file_logging_enabled(false);
    CalendarEngine::new(logger).snapshot(&CalendarNav::new(mode, anchor), events)
}
