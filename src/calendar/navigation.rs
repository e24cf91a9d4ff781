use crate::calendar::view_window::{ViewWindow, compute_window};
use crate::core::types::ViewMode;
use crate::extensions::chrono::NaiveDateExt;
use chrono::{Duration, NaiveDate};

/// Which period is on screen and which day the user last picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarNav {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    pub selected: NaiveDate,
}

impl CalendarNav {
    pub fn new(mode: ViewMode, today: NaiveDate) -> Self {
        Self {
            mode,
            anchor: today,
            selected: today,
        }
    }

    pub fn window(&self) -> ViewWindow {
        compute_window(self.mode, self.anchor)
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn previous(&mut self) {
        self.shift(-1);
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, delta: i32) {
        self.anchor = match self.mode {
            ViewMode::Week => self.anchor + Duration::weeks(delta as i64),
            ViewMode::Month => self.anchor.shift_months(delta),
        };
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.anchor = today;
        self.selected = today;
    }

    pub fn goto(&mut self, date: NaiveDate) {
        self.anchor = date;
        self.selected = date;
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }
}
