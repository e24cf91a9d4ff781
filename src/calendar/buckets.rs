use crate::core::models::EventOccurrence;
use chrono::{NaiveDate, NaiveDateTime};

pub const DEFAULT_MONTH_CELL_LIMIT: usize = 3;

/// Starts and ends on different calendar dates.
pub fn is_multi_day(occ: &EventOccurrence) -> bool {
    occ.start.date() != occ.end.date()
}

/// Single-day occurrences starting on `day`, by start time. Equal starts keep input order.
pub fn bucket_for_day<'a>(occs: &'a [EventOccurrence], day: NaiveDate) -> Vec<&'a EventOccurrence> {
    let mut bucket: Vec<&EventOccurrence> = occs
        .iter()
        .filter(|o| !is_multi_day(o) && o.start.date() == day)
        .collect();
    bucket.sort_by_key(|o| o.start);
    bucket
}

/// Multi-day occurrences overlapping `[start, end)`.
pub fn multi_day_in_range<'a>(
    occs: &'a [EventOccurrence],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<&'a EventOccurrence> {
    occs.iter()
        .filter(|o| is_multi_day(o) && o.overlaps(start, end))
        .collect()
}

/// One month-grid cell: what fits, plus how many are hidden behind "+N more".
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell<'a> {
    pub day: NaiveDate,
    pub visible: Vec<&'a EventOccurrence>,
    pub overflow: usize,
}

impl MonthCell<'_> {
    pub fn total(&self) -> usize {
        self.visible.len() + self.overflow
    }

    pub fn more_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

pub fn month_cell<'a>(occs: &'a [EventOccurrence], day: NaiveDate, limit: usize) -> MonthCell<'a> {
    let mut visible = bucket_for_day(occs, day);
    let overflow = visible.len().saturating_sub(limit);
    visible.truncate(limit);
    MonthCell {
        day,
        visible,
        overflow,
    }
}
