use crate::calendar::CalendarSnapshot;
use crate::config::Config;
use crate::core::types::ViewMode;
use crate::ui::display_data::DisplayDataBuilder;
use crate::ui::table_printer::TablePrinter;
use chrono::NaiveDate;
use std::io::{self, Write};

#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub data: DisplayDataBuilder,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid for the snapshot's mode followed by the occurrence table.
    pub fn render_snapshot<W: Write + ?Sized>(
        &self,
        snapshot: &CalendarSnapshot,
        today: NaiveDate,
        out: &mut W,
    ) -> io::Result<()> {
        let lines = match snapshot.mode {
            ViewMode::Month => self.data.month_lines(snapshot, today),
            ViewMode::Week => self.data.week_lines(snapshot, today),
        };
        let width = lines
            .first()
            .map(|l| l.chars().count())
            .unwrap_or_default();
        self.printer
            .render_banner(&self.data.title(snapshot), width, out)?;
        for line in &lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;

        let rows = self.data.occurrence_rows(snapshot);
        self.printer.render_table(
            "Occurrences",
            &["ID", "TITLE", "CATEGORY", "START", "END", "RULE"],
            &rows,
            "No events in this view.",
            out,
        )?;

        if snapshot.mode == ViewMode::Week && !snapshot.timed.is_empty() {
            writeln!(out)?;
            let rows = self.data.timed_rows(snapshot);
            self.printer.render_table(
                "Time grid",
                &["ID", "DAY", "TOP", "HEIGHT"],
                &rows,
                "",
                out,
            )?;
        }
        Ok(())
    }

    pub fn display_snapshot(&self, snapshot: &CalendarSnapshot, today: NaiveDate) {
        let mut stdout = io::stdout();
        let _ = self.render_snapshot(snapshot, today, &mut stdout);
    }

    pub fn render_config<W: Write + ?Sized>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let rows = self.data.config_rows(config);
        self.printer.render_table(
            "Config",
            &["KEY", "DESCRIPTION", "VALUE"],
            &rows,
            "No config items found.",
            out,
        )
    }

    pub fn display_config(&self, config: &Config) {
        let mut stdout = io::stdout();
        let _ = self.render_config(config, &mut stdout);
    }
}
