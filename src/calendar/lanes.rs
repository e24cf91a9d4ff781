use crate::calendar::buckets::multi_day_in_range;
use crate::core::models::EventOccurrence;
use crate::extensions::chrono::{NaiveDateExt, NaiveDateTimeExt};
use chrono::{Duration, NaiveDate};

/// Vertical distance between stacked multi-day bars.
pub const LANE_HEIGHT_PX: f64 = 22.0;
pub const DAYS_PER_WEEK: i64 = 7;

/// Lane index per occurrence id, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneAssignment {
    entries: Vec<(String, usize)>,
    lane_count: usize,
}

impl LaneAssignment {
    pub fn lane_of(&self, occurrence_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(id, _)| id == occurrence_id)
            .map(|(_, lane)| *lane)
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(id, lane)| (id.as_str(), *lane))
    }
}

fn disjoint(a: &EventOccurrence, b: &EventOccurrence) -> bool {
    a.start >= b.end || a.end <= b.start
}

pub trait LanePacker {
    /// Lane that should take `occ`, or `None` to open a new one.
    fn select_lane(&self, lanes: &[Vec<&EventOccurrence>], occ: &EventOccurrence) -> Option<usize>;

    /// Template Method: stable sort by start, then place each occurrence in turn.
    fn assign(&self, occs: &[&EventOccurrence]) -> LaneAssignment {
        let mut ordered: Vec<&EventOccurrence> = occs.to_vec();
        ordered.sort_by_key(|o| o.start);

        let mut lanes: Vec<Vec<&EventOccurrence>> = Vec::new();
        let mut entries = Vec::with_capacity(ordered.len());

        for occ in ordered {
            let lane = match self.select_lane(&lanes, occ) {
                Some(idx) => idx,
                None => {
                    lanes.push(Vec::new());
                    lanes.len() - 1
                }
            };
            lanes[lane].push(occ);
            entries.push((occ.id.clone(), lane));
        }

        LaneAssignment {
            entries,
            lane_count: lanes.len(),
        }
    }
}

/// Lowest-index lane with no time overlap.
pub struct FirstFitLanePacker;

impl LanePacker for FirstFitLanePacker {
    fn select_lane(&self, lanes: &[Vec<&EventOccurrence>], occ: &EventOccurrence) -> Option<usize> {
        lanes
            .iter()
            .position(|lane| lane.iter().all(|member| disjoint(occ, member)))
    }
}

pub fn assign_lanes(occs: &[EventOccurrence]) -> LaneAssignment {
    let refs: Vec<&EventOccurrence> = occs.iter().collect();
    FirstFitLanePacker.assign(&refs)
}

/// A multi-day bar positioned inside one week row.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSpan {
    pub occurrence: EventOccurrence,
    pub lane: usize,
    /// 0 = Sunday.
    pub start_col: u32,
    /// Inclusive.
    pub end_col: u32,
    pub left_fraction: f64,
    pub width_fraction: f64,
    pub top_px: f64,
}

impl WeekSpan {
    pub fn columns(&self) -> u32 {
        self.end_col - self.start_col + 1
    }
}

/// Last calendar day the occurrence occupies. An end exactly at midnight
/// after the start date belongs to the day before.
pub fn last_visible_day(occ: &EventOccurrence) -> NaiveDate {
    let end_day = occ.end.date();
    if occ.end.is_midnight() && end_day > occ.start.date() {
        end_day - Duration::days(1)
    } else {
        end_day
    }
}

fn column_in_week(week_start: NaiveDate, day: NaiveDate) -> u32 {
    (day - week_start).num_days().clamp(0, DAYS_PER_WEEK - 1) as u32
}

/// Lanes and column spans for the multi-day occurrences touching the week.
pub fn layout_week(occs: &[EventOccurrence], week_start: NaiveDate) -> (Vec<WeekSpan>, usize) {
    let week_start = week_start.week_start();
    let range_start = week_start.midnight();
    let range_end = (week_start + Duration::days(DAYS_PER_WEEK)).midnight();

    let in_week = multi_day_in_range(occs, range_start, range_end);
    let assignment = FirstFitLanePacker.assign(&in_week);

    let spans = in_week
        .into_iter()
        .filter_map(|occ| {
            let lane = assignment.lane_of(&occ.id)?;
            let start_col = column_in_week(week_start, occ.start.date());
            let end_col = column_in_week(week_start, last_visible_day(occ)).max(start_col);
            let per_col = 1.0 / DAYS_PER_WEEK as f64;
            Some(WeekSpan {
                occurrence: occ.clone(),
                lane,
                start_col,
                end_col,
                left_fraction: start_col as f64 * per_col,
                width_fraction: (end_col - start_col + 1) as f64 * per_col,
                top_px: lane as f64 * LANE_HEIGHT_PX,
            })
        })
        .collect();

    (spans, assignment.lane_count())
}
