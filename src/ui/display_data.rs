use crate::calendar::{CalendarSnapshot, WeekLayout};
use crate::config::Config;
use crate::core::models::EventOccurrence;
use crate::core::types::ViewMode;
use crate::ui::ansi::{FG_LIGHT_GRAY, STYLE_RESET, STYLE_REVERSE};
use crate::ui::width_util::WidthUtil;
use chrono::{Datelike, NaiveDate, Timelike};

/// Columns each grid cell is drawn with, separator excluded.
pub const CELL_WIDTH: usize = 14;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Turns a calendar snapshot into printable lines and table rows.
#[derive(Debug, Default, Clone)]
pub struct DisplayDataBuilder {
    util: WidthUtil,
}

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One row per occurrence, by start: id, title, category, start, end, rule.
    pub fn occurrence_rows(&self, snapshot: &CalendarSnapshot) -> Vec<Vec<String>> {
        let mut occs: Vec<&EventOccurrence> = snapshot.occurrences.iter().collect();
        occs.sort_by_key(|o| o.start);
        occs.into_iter()
            .map(|o| {
                let rule = o
                    .recurrence
                    .as_ref()
                    .map(|r| r.rule_body().to_string())
                    .unwrap_or_else(|| "-".into());
                vec![
                    o.category.paint(&o.id),
                    o.title.clone(),
                    o.category.to_string(),
                    o.start.format("%Y-%m-%d %H:%M").to_string(),
                    o.end.format("%Y-%m-%d %H:%M").to_string(),
                    rule,
                ]
            })
            .collect()
    }

    /// Week-grid geometry of each timed block: id, day, top, height.
    pub fn timed_rows(&self, snapshot: &CalendarSnapshot) -> Vec<Vec<String>> {
        snapshot
            .timed
            .iter()
            .map(|b| {
                vec![
                    b.occurrence.id.clone(),
                    WEEKDAYS[b.column as usize % 7].to_string(),
                    format!("{:.1}px", b.top_px),
                    format!("{:.1}px", b.height_px),
                ]
            })
            .collect()
    }

    pub fn config_rows(&self, config: &Config) -> Vec<Vec<String>> {
        config
            .rows()
            .iter()
            .map(|(k, d, v)| vec![k.clone(), d.clone(), v.clone()])
            .collect()
    }

    pub fn header_line(&self) -> String {
        WEEKDAYS
            .iter()
            .map(|d| self.util.fit(d, CELL_WIDTH))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Title above the grid, e.g. "January 2025" or "Week of 2025-01-05".
    pub fn title(&self, snapshot: &CalendarSnapshot) -> String {
        match snapshot.mode {
            ViewMode::Month => {
                // The anchor month is the one holding the window's middle day.
                let middle = snapshot.window.first_day() + chrono::Duration::days(14);
                middle.format("%B %Y").to_string()
            }
            ViewMode::Week => format!("Week of {}", snapshot.window.first_day()),
        }
    }

    /// Six week rows: day numbers, multi-day lanes, then capped single-day entries.
    pub fn month_lines(&self, snapshot: &CalendarSnapshot, today: NaiveDate) -> Vec<String> {
        let mut lines = vec![self.header_line()];
        for week in snapshot.days.chunks(7) {
            lines.push(self.day_number_line(snapshot, week, today));
            if let Some(layout) = week.first().and_then(|d| snapshot.week_of(*d)) {
                lines.extend(self.lane_lines(layout));
            }
            let cells: Vec<_> = week.iter().map(|d| snapshot.month_cell(*d)).collect();
            let depth = cells
                .iter()
                .map(|c| c.visible.len() + usize::from(c.overflow > 0))
                .max()
                .unwrap_or(0);
            for row in 0..depth {
                let line = cells
                    .iter()
                    .map(|cell| {
                        if let Some(occ) = cell.visible.get(row) {
                            self.entry_cell(occ)
                        } else if row == cell.visible.len() {
                            let label = cell.more_label().unwrap_or_default();
                            self.util.fit(&label, CELL_WIDTH)
                        } else {
                            " ".repeat(CELL_WIDTH)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("|");
                lines.push(line);
            }
            lines.push("-".repeat(CELL_WIDTH * 7 + 6));
        }
        lines
    }

    /// Day numbers, lane bars, then the timed entries grouped by starting hour.
    pub fn week_lines(&self, snapshot: &CalendarSnapshot, today: NaiveDate) -> Vec<String> {
        let mut lines = vec![self.header_line()];
        lines.push(self.day_number_line(snapshot, &snapshot.days, today));
        if let Some(layout) = snapshot.weeks.first() {
            lines.extend(self.lane_lines(layout));
        }
        lines.push("-".repeat(CELL_WIDTH * 7 + 6));

        let mut blocks: Vec<_> = snapshot.timed.iter().collect();
        blocks.sort_by(|a, b| a.top_px.total_cmp(&b.top_px));
        let mut hours: Vec<u32> = blocks.iter().map(|b| b.occurrence.start.hour()).collect();
        hours.dedup();

        for hour in hours {
            let line = (0..7)
                .map(|col| {
                    let here: Vec<_> = blocks
                        .iter()
                        .filter(|b| b.column == col && b.occurrence.start.hour() == hour)
                        .collect();
                    match here.first() {
                        Some(first) => {
                            let mut text = format!(
                                "{} {}",
                                first.occurrence.start.format("%H:%M"),
                                first.occurrence.title
                            );
                            if here.len() > 1 {
                                text = format!("{text} +{}", here.len() - 1);
                            }
                            first
                                .occurrence
                                .category
                                .paint(self.util.fit(&text, CELL_WIDTH))
                        }
                        None => " ".repeat(CELL_WIDTH),
                    }
                })
                .collect::<Vec<_>>()
                .join("|");
            lines.push(line);
        }
        if snapshot.timed.is_empty() {
            lines.push("No timed events this week.".to_string());
        }
        lines
    }

    fn day_number_line(
        &self,
        snapshot: &CalendarSnapshot,
        days: &[NaiveDate],
        today: NaiveDate,
    ) -> String {
        days.iter()
            .map(|d| {
                let text = self.util.fit(&d.day().to_string(), CELL_WIDTH);
                let in_window = snapshot
                    .window
                    .contains(d.and_time(chrono::NaiveTime::MIN));
                if *d == today || *d == snapshot.selected {
                    format!("{STYLE_REVERSE}{text}{STYLE_RESET}")
                } else if !in_window {
                    format!("{FG_LIGHT_GRAY}{text}{STYLE_RESET}")
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    /// One line per lane; a span fills its columns with `=title`. Two spans of a
    /// lane can touch the same day column; the later one starts after the earlier bar.
    fn lane_lines(&self, layout: &WeekLayout) -> Vec<String> {
        (0..layout.lane_count)
            .map(|lane| {
                let mut spans: Vec<_> = layout.spans.iter().filter(|s| s.lane == lane).collect();
                spans.sort_by_key(|s| (s.start_col, s.end_col));

                let mut cells = vec![" ".repeat(CELL_WIDTH); 7];
                let mut next_free = 0usize;
                for span in spans {
                    let start = (span.start_col as usize).max(next_free);
                    let end = span.end_col as usize;
                    if start > end {
                        continue;
                    }
                    let width = (end - start + 1) * (CELL_WIDTH + 1) - 1;
                    let bar = self
                        .util
                        .fit(&format!("={}", span.occurrence.title), width);
                    cells[start] = span.occurrence.category.paint(bar);
                    for cell in cells.iter_mut().take(end + 1).skip(start + 1) {
                        cell.clear();
                    }
                    next_free = end + 1;
                }
                join_lane_cells(&cells)
            })
            .collect()
    }

    fn entry_cell(&self, occ: &EventOccurrence) -> String {
        let text = format!("{} {}", occ.start.format("%H:%M"), occ.title);
        occ.category.paint(self.util.fit(&text, CELL_WIDTH))
    }
}

/// Cells emptied by a wider bar take no separator.
fn join_lane_cells(cells: &[String]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        if i > 0 {
            line.push('|');
        }
        line.push_str(cell);
    }
    line
}
