use crate::errors::{Error, Result};
use crate::prompter::models::{Flow, FlowCtrl};
use crate::ui::ansi::{
    CURSOR_BLINKING_BLOCK, CURSOR_HOME, ENTER_ALT_SCREEN, EXIT_ALT_SCREEN, HIDE_CURSOR, SHOW_CURSOR,
};
use std::io::{self, BufRead, BufReader, Write};

/// Render/read loop that drives a [`Flow`] one input line at a time.
#[derive(Debug, Default, Clone)]
pub struct Prompter;

/// Restores the main screen and cursor however the loop exits.
struct AltScreenGuard;

impl AltScreenGuard {
    fn enter() -> Self {
        emit(&format!("{ENTER_ALT_SCREEN}{CURSOR_HOME}"));
        Self
    }
}

impl Drop for AltScreenGuard {
    fn drop(&mut self) {
        emit(&format!("{SHOW_CURSOR}{EXIT_ALT_SCREEN}"));
    }
}

fn emit(seq: &str) {
    print!("{seq}");
    let _ = io::stdout().flush();
}

impl Prompter {
    pub fn new() -> Self {
        Self
    }

    pub fn run<F: Flow>(&self, flow: F, use_alt_screen: bool) -> Result<()> {
        self.run_with_reader(flow, use_alt_screen, BufReader::new(io::stdin()))
    }

    /// Stops on end of input, on `exit`, or when the flow finishes.
    pub fn run_with_reader<F: Flow, R: BufRead>(
        &self,
        mut flow: F,
        use_alt_screen: bool,
        mut reader: R,
    ) -> Result<()> {
        let _alt = use_alt_screen.then(AltScreenGuard::enter);

        loop {
            emit(HIDE_CURSOR);
            flow.render()?;
            emit(&format!("{SHOW_CURSOR}{CURSOR_BLINKING_BLOCK}"));

            let mut line = String::new();
            if reader.read_line(&mut line).map_err(Error::Io)? == 0 {
                return Ok(());
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("exit") {
                return Ok(());
            }

            if let FlowCtrl::Finish = flow.handle_input(line)? {
                return Ok(());
            }
        }
    }
}
