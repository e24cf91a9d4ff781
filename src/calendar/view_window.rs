use crate::core::types::ViewMode;
use crate::extensions::chrono::NaiveDateExt;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;

/// Visible span of whole days, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ViewWindow {
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Ordered calendar dates covered by the window.
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.first_day();
        (0..self.num_days())
            .map(|offset| first + Duration::days(offset))
            .collect()
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

impl fmt::Display for ViewWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

pub fn compute_window(mode: ViewMode, anchor: NaiveDate) -> ViewWindow {
    match mode {
        ViewMode::Week => {
            let start = anchor.week_start();
            ViewWindow {
                start: start.midnight(),
                end: (start + Duration::days(7)).midnight(),
            }
        }
        ViewMode::Month => {
            let start = anchor.first_of_month().week_start();
            let end = anchor.last_of_month().week_end() + Duration::days(1);
            ViewWindow {
                start: start.midnight(),
                end: end.midnight(),
            }
        }
    }
}

/// Cells drawn for `mode`: one week row, or a fixed 6x7 month grid from `window.start`.
pub fn grid_days(mode: ViewMode, window: &ViewWindow) -> Vec<NaiveDate> {
    let first = window.first_day();
    (0..mode.grid_days() as i64)
        .map(|offset| first + Duration::days(offset))
        .collect()
}
