use crate::ui::ansi::{
    CLEAR_LINE_REST, CLEAR_SCREEN, CURSOR_HOME, FG_LIGHT_GRAY, PROMPT_STYLE, STYLE_BOLD,
    STYLE_ITALIC, STYLE_RESET,
};
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

/// Screen-level helpers (banner, clearing, prompt line).
#[derive(Debug, Default, Clone)]
pub struct UiChrome {
    util: WidthUtil,
}

impl UiChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner_lines(&self) -> Vec<String> {
        const INNER_WIDTH: usize = 50;
        let version = env!("CARGO_PKG_VERSION");
        let title = format!(
            "{STYLE_BOLD}P L A N G R I D{STYLE_RESET} {FG_LIGHT_GRAY}(v{version}){STYLE_RESET}"
        );
        let subtitle = format!("{STYLE_ITALIC}Recurring events on a time grid{STYLE_RESET}");
        vec![
            format!("╭{}╮", "─".repeat(INNER_WIDTH)),
            format!("│{}│", self.center_in_box(&title, INNER_WIDTH)),
            format!("│{}│", self.center_in_box(&subtitle, INNER_WIDTH)),
            format!("╰{}╯", "─".repeat(INNER_WIDTH)),
        ]
    }

    pub fn print_banner(&self) {
        for line in self.banner_lines() {
            println!("{line}");
        }
    }

    pub fn clear_screen(&self) {
        print!("{CLEAR_SCREEN}{CURSOR_HOME}");
        let _ = io::stdout().flush();
    }

    pub fn print_prompt(&self, prompt: &str) {
        print!("{PROMPT_STYLE}{prompt}{CLEAR_LINE_REST}");
        let _ = io::stdout().flush();
    }

    /// Ends the styled input line after the user pressed enter.
    pub fn end_prompt(&self) {
        print!("{STYLE_RESET}");
        let _ = io::stdout().flush();
    }

    /// `s` centered in a `width`-column box; longer text is returned unchanged.
    pub fn center_in_box(&self, s: &str, width: usize) -> String {
        let content_width = self.util.visible_width(s);
        if content_width >= width {
            return s.to_string();
        }
        let left = (width - content_width) / 2;
        let right = width - content_width - left;
        format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
    }
}
