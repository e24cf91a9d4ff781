use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

/// Plain column tables for the occurrence list and the config view.
#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column widths followed by three-column " | " separators.
    pub fn table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        let widths = self.col_widths(headers, rows);
        if widths.is_empty() {
            0
        } else {
            widths.iter().sum::<usize>() + (widths.len() - 1) * 3
        }
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let width = width.max(self.util.visible_width(title)).max(1);
        writeln!(out, "{}", "-".repeat(width))?;
        writeln!(out, "{}", title.to_uppercase())?;
        writeln!(out, "{}", "-".repeat(width))
    }

    /// Banner, header row and rows. `empty_message` replaces the header when there are no rows.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let widths = self.col_widths(headers, rows);
        let total = self.table_width(headers, rows);

        if rows.is_empty() {
            let width = total.max(self.util.visible_width(empty_message));
            self.render_banner(title, width, out)?;
            writeln!(out, "{empty_message}")?;
            return writeln!(out, "{}", "-".repeat(width.max(title.len())));
        }

        let width = total.max(title.len());
        self.render_banner(title, width, out)?;
        writeln!(out, "{}", self.join_padded(headers, &widths))?;
        writeln!(out, "{}", "-".repeat(width))?;
        for row in rows {
            writeln!(out, "{}", self.join_padded(row, &widths))?;
        }
        writeln!(out, "{}", "-".repeat(width))
    }

    fn col_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| self.util.visible_width(h))
            .collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn join_padded<T: AsRef<str>>(&self, cells: &[T], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| self.util.pad_visible(cell.as_ref(), *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }
}
