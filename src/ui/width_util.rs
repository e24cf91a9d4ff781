use terminal_size::{Width, terminal_size};

use crate::ui::ansi::ESC_BYTE;
type ByteIter<'a> = std::iter::Peekable<std::str::Bytes<'a>>;

/// Column math for styled strings.
#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    pub(crate) fn strip_ansi(s: &str) -> String {
        let mut out = Vec::with_capacity(s.len());
        let mut bytes = s.bytes().peekable();

        while let Some(byte) = bytes.next() {
            if byte == ESC_BYTE && matches!(bytes.peek(), Some(b'[')) {
                Self::consume_csi(&mut bytes);
                continue;
            }
            out.push(byte);
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    fn consume_csi(bytes: &mut ByteIter<'_>) {
        let _ = bytes.next(); // '['
        for b in bytes.by_ref() {
            if b.is_ascii_alphabetic() {
                break;
            }
        }
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let w = self.visible_width(s);
        if w >= width {
            s.to_string()
        } else {
            format!("{s}{}", " ".repeat(width - w))
        }
    }

    /// Plain text cut to `width` columns, ending in `…` when shortened.
    pub fn truncate(&self, s: &str, width: usize) -> String {
        let plain = Self::strip_ansi(s);
        if plain.chars().count() <= width {
            return plain;
        }
        if width == 0 {
            return String::new();
        }
        let mut out: String = plain.chars().take(width - 1).collect();
        out.push('…');
        out
    }

    /// Truncate then pad, so every cell is exactly `width` columns.
    pub fn fit(&self, s: &str, width: usize) -> String {
        self.pad_visible(&self.truncate(s, width), width)
    }

    /// Best-effort terminal width (defaults to 80).
    pub fn terminal_width(&self) -> usize {
        if let Some((Width(w), _)) = terminal_size() {
            w as usize
        } else {
            80
        }
    }

    /// Left padding to center a box of `content_width` inside the terminal.
    pub fn center_pad(&self, content_width: usize) -> usize {
        self.terminal_width().saturating_sub(content_width) / 2
    }
}
