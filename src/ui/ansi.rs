// ANSI/VT100 control sequences shared by the terminal views.

/// ESC as a byte value, used when measuring styled text.
pub const ESC_BYTE: u8 = 0x1B;

#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}

#[macro_export]
macro_rules! csi2 {
    ($first:literal, $second:literal) => {
        concat!("\x1B[", $first, "\x1B[", $second)
    };
}

/// Switch to the terminal's alternate screen buffer (smcup).
pub const ENTER_ALT_SCREEN: &str = crate::csi!("?1049h");
/// Return to the main screen buffer (rmcup).
pub const EXIT_ALT_SCREEN: &str = crate::csi!("?1049l");

pub const CLEAR_SCREEN: &str = crate::csi!("2J");
pub const CURSOR_HOME: &str = crate::csi!("H");
pub const CLEAR_LINE_REST: &str = crate::csi!("0K");

pub const HIDE_CURSOR: &str = crate::csi!("?25l");
pub const SHOW_CURSOR: &str = crate::csi!("?25h");
/// Blinking block cursor, where supported.
pub const CURSOR_BLINKING_BLOCK: &str = crate::csi!("1 q");

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
pub const STYLE_ITALIC: &str = crate::csi!("3m");
/// Reverse video, used for today and the selected date.
pub const STYLE_REVERSE: &str = crate::csi!("7m");
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");
/// White on dark gray for the input line.
pub const PROMPT_STYLE: &str = crate::csi2!("38;5;15m", "48;5;236m");
