use crate::core::models::EventOccurrence;
use crate::extensions::chrono::{NaiveDateExt, NaiveDateTimeExt};
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const MINUTES_PER_DAY: i64 = 24 * 60;
/// Smallest height an event block is drawn or resized to.
pub const MIN_EVENT_HEIGHT_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScale {
    pub px_per_hour: f64,
    pub snap_minutes: u32,
    pub quick_add_minutes: u32,
}

impl Default for GridScale {
    fn default() -> Self {
        Self {
            px_per_hour: 50.0,
            snap_minutes: 15,
            quick_add_minutes: 60,
        }
    }
}

impl GridScale {
    pub fn new(px_per_hour: f64, snap_minutes: u32, quick_add_minutes: u32) -> Self {
        Self {
            px_per_hour,
            snap_minutes: snap_minutes.max(1),
            quick_add_minutes,
        }
    }

    pub fn day_height_px(&self) -> f64 {
        self.px_per_hour * 24.0
    }

    /// Duration equivalent of `MIN_EVENT_HEIGHT_PX`, rounded up to a whole minute.
    pub fn min_duration(&self) -> Duration {
        let minutes = (MIN_EVENT_HEIGHT_PX * 60.0 / self.px_per_hour).ceil() as i64;
        Duration::minutes(minutes)
    }
}

/// Timed block inside the week grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedBlock {
    pub occurrence: EventOccurrence,
    /// 0 = Sunday.
    pub column: u32,
    pub top_px: f64,
    pub height_px: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeGridMapper {
    scale: GridScale,
}

impl TimeGridMapper {
    pub fn new(scale: GridScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> &GridScale {
        &self.scale
    }

    pub fn time_to_offset_px(&self, t: NaiveDateTime) -> f64 {
        t.minutes_since_midnight() as f64 * self.scale.px_per_hour / 60.0
    }

    /// Minutes from midnight for `px`, clamped to the day.
    pub fn raw_minutes(&self, px: f64) -> f64 {
        (px * 60.0 / self.scale.px_per_hour).clamp(0.0, MINUTES_PER_DAY as f64)
    }

    pub fn snap(&self, raw_minutes: f64) -> i64 {
        let step = self.scale.snap_minutes as f64;
        let snapped = ((raw_minutes / step).round() * step) as i64;
        snapped.clamp(0, MINUTES_PER_DAY)
    }

    /// Snapped wall-clock time on `day`. The bottom edge reads as the next midnight.
    pub fn offset_px_to_time(&self, px: f64, day: NaiveDate) -> NaiveDateTime {
        day.midnight() + Duration::minutes(self.snap(self.raw_minutes(px)))
    }

    /// New end after dragging the bottom edge to `height_px` below the top.
    /// Start never moves and the result is never shorter than the minimum height.
    pub fn resize_end(&self, start: NaiveDateTime, height_px: f64) -> NaiveDateTime {
        let height = height_px.max(MIN_EVENT_HEIGHT_PX);
        let top = self.time_to_offset_px(start);
        let end = self.offset_px_to_time(top + height, start.date());
        end.max(start + self.scale.min_duration())
    }

    /// Start and end after dropping at `drop_px` on `drop_day`, the pointer
    /// having grabbed the block `grab_offset_px` below its top.
    pub fn move_to(
        &self,
        duration: Duration,
        drop_day: NaiveDate,
        drop_px: f64,
        grab_offset_px: f64,
    ) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.offset_px_to_time(drop_px - grab_offset_px, drop_day);
        (start, start + duration)
    }

    pub fn quick_add_range(&self, day: NaiveDate, click_px: f64) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.offset_px_to_time(click_px, day);
        (
            start,
            start + Duration::minutes(self.scale.quick_add_minutes as i64),
        )
    }

    /// Height an occurrence is drawn with on its start day, cut at midnight.
    pub fn block_height_px(&self, occ: &EventOccurrence) -> f64 {
        let day_end = (occ.start.date() + Duration::days(1)).midnight();
        let visible_minutes = (occ.end.min(day_end) - occ.start).num_minutes().max(0) as f64;
        (visible_minutes * self.scale.px_per_hour / 60.0).max(MIN_EVENT_HEIGHT_PX)
    }

    pub fn timed_block(&self, occ: &EventOccurrence, week_start: NaiveDate) -> TimedBlock {
        TimedBlock {
            occurrence: occ.clone(),
            column: (occ.start.date() - week_start.week_start())
                .num_days()
                .clamp(0, 6) as u32,
            top_px: self.time_to_offset_px(occ.start),
            height_px: self.block_height_px(occ),
        }
    }
}
