use crate::calendar::buckets::{DEFAULT_MONTH_CELL_LIMIT, MonthCell, is_multi_day, month_cell};
use crate::calendar::lanes::{WeekSpan, layout_week};
use crate::calendar::navigation::CalendarNav;
use crate::calendar::recurrence::{ExpansionObserver, RecurrenceExpander};
use crate::calendar::time_grid::{GridScale, TimeGridMapper, TimedBlock};
use crate::calendar::view_window::{ViewWindow, grid_days};
use crate::config::Config;
use crate::core::models::{BaseEvent, EventOccurrence};
use crate::core::store::EventStore;
use crate::core::types::ViewMode;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use chrono::{Duration, NaiveDate};

pub mod buckets;
pub mod interaction;
pub mod lanes;
pub mod navigation;
pub mod recurrence;
pub mod time_grid;
pub mod view_window;
#[cfg(test)]
mod tests;

pub(crate) struct LoggerObserver {
    logger: Logger,
}

impl ExpansionObserver for LoggerObserver {
    fn rule_rejected(&self, event: &BaseEvent, error: &Error) {
        self.logger.warn(
            format!("{error}. Showing event with id {} once.", event.id),
            LogTarget::FileOnly,
        );
    }

    fn event_expanded(&self, event_id: i32, instances: usize, limited: bool) {
        if limited {
            self.logger.warn(
                format!(
                    "Expansion of event with id {event_id} stopped at {instances} instances"
                ),
                LogTarget::FileOnly,
            );
        } else {
            self.logger.info(
                format!("Event with id {event_id} expanded into {instances} instances"),
                LogTarget::FileOnly,
            );
        }
    }
}

/// One week row of multi-day bars.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub spans: Vec<WeekSpan>,
    pub lane_count: usize,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub mode: ViewMode,
    pub window: ViewWindow,
    pub selected: NaiveDate,
    pub occurrences: Vec<EventOccurrence>,
    /// Grid cells in display order: 7 for a week, 42 for a month.
    pub days: Vec<NaiveDate>,
    pub weeks: Vec<WeekLayout>,
    /// Single-day occurrences on the week time grid; empty in month mode.
    pub timed: Vec<TimedBlock>,
    pub month_cell_limit: usize,
}

impl CalendarSnapshot {
    /// Cell contents for `day`. Days past the window show nothing.
    pub fn month_cell(&self, day: NaiveDate) -> MonthCell<'_> {
        if self.window.contains(day.and_time(chrono::NaiveTime::MIN)) {
            month_cell(&self.occurrences, day, self.month_cell_limit)
        } else {
            month_cell(&[], day, self.month_cell_limit)
        }
    }

    pub fn find(&self, occurrence_id: &str) -> Option<&EventOccurrence> {
        self.occurrences.iter().find(|o| o.id == occurrence_id)
    }

    pub fn week_of(&self, day: NaiveDate) -> Option<&WeekLayout> {
        self.weeks
            .iter()
            .find(|w| w.week_start <= day && day < w.week_start + Duration::days(7))
    }
}

/// Runs window → expansion → buckets/lanes → time grid for the current view.
pub struct CalendarEngine {
    observer: LoggerObserver,
    mapper: TimeGridMapper,
    month_cell_limit: usize,
}

impl CalendarEngine {
    pub fn new(logger: Logger) -> Self {
        Self {
            observer: LoggerObserver { logger },
            mapper: TimeGridMapper::default(),
            month_cell_limit: DEFAULT_MONTH_CELL_LIMIT,
        }
    }

    pub fn from_config(config: &Config, logger: Logger) -> Self {
        Self::new(logger)
            .with_scale(config.grid_scale())
            .with_month_cell_limit(config.month_cell_limit())
    }

    pub fn with_scale(mut self, scale: GridScale) -> Self {
        self.mapper = TimeGridMapper::new(scale);
        self
    }

    pub fn with_month_cell_limit(mut self, limit: usize) -> Self {
        self.month_cell_limit = limit;
        self
    }

    pub fn mapper(&self) -> &TimeGridMapper {
        &self.mapper
    }

    pub fn snapshot(&self, nav: &CalendarNav, events: &[BaseEvent]) -> CalendarSnapshot {
        let window = nav.window();
        let occurrences = RecurrenceExpander::new()
            .with_observer(&self.observer)
            .expand(events, &window);

        let days = grid_days(nav.mode, &window);
        let weeks = window
            .days()
            .into_iter()
            .step_by(7)
            .map(|week_start| {
                let (spans, lane_count) = layout_week(&occurrences, week_start);
                WeekLayout {
                    week_start,
                    spans,
                    lane_count,
                }
            })
            .collect();

        let timed = match nav.mode {
            ViewMode::Week => occurrences
                .iter()
                .filter(|o| !is_multi_day(o) && window.contains(o.start))
                .map(|o| self.mapper.timed_block(o, window.first_day()))
                .collect(),
            ViewMode::Month => Vec::new(),
        };

        self.observer.logger.info(
            format!(
                "Rendered {} view {} with {} occurrences",
                nav.mode,
                window,
                occurrences.len()
            ),
            LogTarget::FileOnly,
        );

        CalendarSnapshot {
            mode: nav.mode,
            window,
            selected: nav.selected,
            occurrences,
            days,
            weeks,
            timed,
            month_cell_limit: self.month_cell_limit,
        }
    }

    /// Re-fetch from the store and rebuild.
    pub fn refresh(&self, store: &dyn EventStore, nav: &CalendarNav) -> Result<CalendarSnapshot> {
        let events = store.fetch()?;
        Ok(self.snapshot(nav, &events))
    }
}
