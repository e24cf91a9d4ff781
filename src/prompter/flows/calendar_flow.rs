use crate::calendar::interaction::{InteractionController, InteractionOutcome, Session};
use crate::calendar::navigation::CalendarNav;
use crate::calendar::{CalendarEngine, CalendarSnapshot};
use crate::core::context::AppContext;
use crate::core::models::EventOccurrence;
use crate::core::types::{Date, Pixels, ShortcutKey};
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::prompter::flows::parse::{USAGE, parse_command};
use crate::prompter::models::{CalendarCommand, Flow, FlowCtrl};
use crate::ui::chrome::UiChrome;
use crate::ui::display_manager::DisplayManager;
use chrono::{Local, NaiveDate};

/// Lines of history shown by `log`.
const LOG_LINES: usize = 20;

/// Calendar screen: renders the current view and feeds commands to the interaction controller.
pub struct CalendarFlow<'a> {
    ctx: &'a mut AppContext,
    engine: CalendarEngine,
    nav: CalendarNav,
    controller: InteractionController,
    dm: DisplayManager,
    chrome: UiChrome,
    today: NaiveDate,
    snapshot: Option<CalendarSnapshot>,
    status: Option<String>,
    logger: Logger,
}

impl<'a> CalendarFlow<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        Self::starting_on(ctx, Local::now().date_naive())
    }

    /// Flow whose "today" is `today`.
    pub fn starting_on(ctx: &'a mut AppContext, today: NaiveDate) -> Self {
        let logger = ctx.logger.clone();
        let engine = CalendarEngine::from_config(&ctx.config, logger.clone());
        let controller =
            InteractionController::new(engine.mapper().clone()).with_logger(logger.clone());
        let nav = CalendarNav::new(ctx.config.default_view(), today);
        Self {
            ctx,
            engine,
            nav,
            controller,
            dm: DisplayManager::new(),
            chrome: UiChrome::new(),
            today,
            snapshot: None,
            status: None,
            logger,
        }
    }

    pub fn nav(&self) -> &CalendarNav {
        &self.nav
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Snapshot of the current view, rebuilt from the store when stale.
    pub fn snapshot(&mut self) -> Result<&CalendarSnapshot> {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.engine.refresh(&self.ctx.store, &self.nav)?);
        }
        self.snapshot
            .as_ref()
            .ok_or_else(|| Error::Domain("Calendar view unavailable.".into()))
    }

    fn print_startup(&mut self) {
        if self.ctx.startup_displayed {
            return;
        }
        self.chrome.print_banner();
        println!();
        println!("Type 'help' for the command list.");
        println!("Config path: {}", self.ctx.config_path.display());
        println!("Events path: {}", self.ctx.events_path.display());
        println!("Logs path: {}", self.ctx.logs_dir.display());
        println!();
        self.ctx.startup_displayed = true;
    }

    fn print_modal(&self) {
        if let Some(dialog) = self.controller.dialog() {
            let kind = if dialog.all_day { "all-day " } else { "" };
            println!(
                "New {kind}event {} - {}. Type 'new <title>' or 'esc'.",
                dialog.start.format("%Y-%m-%d %H:%M"),
                dialog.end.format("%Y-%m-%d %H:%M")
            );
        }
        match self.controller.session() {
            Session::QuickAdding(q) => println!(
                "Quick add {} - {}. Type 'add <title>' or 'esc'.",
                q.start.format("%Y-%m-%d %H:%M"),
                q.end.format("%H:%M")
            ),
            Session::Idle => {}
            other => println!("Gesture in progress: {}", other.name()),
        }
    }

    fn day(s: &str) -> Result<NaiveDate> {
        Date::try_from_str(s).map(|d| d.0)
    }

    fn px(s: &str) -> Result<f64> {
        Pixels::try_from_str(s).map(|p| p.0)
    }

    /// Occurrence currently on screen with id `id`.
    fn occurrence(&mut self, id: &str) -> Result<EventOccurrence> {
        self.snapshot()?
            .find(id)
            .cloned()
            .ok_or_else(|| Error::Domain(format!("No occurrence '{id}' in the current view.")))
    }

    fn run(&mut self, command: CalendarCommand) -> Result<Option<InteractionOutcome>> {
        let outcome = match command {
            CalendarCommand::Key(name) => {
                let key = ShortcutKey::try_from(&name)?;
                self.controller.handle_key(key, &mut self.nav, self.today)
            }
            CalendarCommand::Goto(s) => {
                self.nav.goto(Self::day(&s)?);
                InteractionOutcome::Navigated(self.nav.anchor)
            }
            CalendarCommand::Select(s) => {
                self.nav.select(Self::day(&s)?);
                InteractionOutcome::Navigated(self.nav.anchor)
            }
            CalendarCommand::Click { day, px } => self
                .controller
                .click_empty_slot(Self::day(&day)?, Self::px(&px)?),
            CalendarCommand::QuickAdd(title) => self
                .controller
                .confirm_quick_add(&title, &mut self.ctx.store),
            CalendarCommand::SubmitDialog(title) => self
                .controller
                .submit_dialog(&title, &mut self.ctx.store),
            CalendarCommand::Cancel => self.controller.cancel(),
            CalendarCommand::DownCell(day) => self.controller.begin_selection(Self::day(&day)?),
            CalendarCommand::DownEvent {
                occurrence_id,
                day,
                px,
            } => {
                let (day, px) = (Self::day(&day)?, Self::px(&px)?);
                let occ = self.occurrence(&occurrence_id)?;
                self.controller.begin_drag(&occ, day, px)
            }
            CalendarCommand::DownEdge { occurrence_id, px } => {
                let px = Self::px(&px)?;
                let occ = self.occurrence(&occurrence_id)?;
                self.controller.begin_resize(&occ, px)
            }
            CalendarCommand::Move { day, px } => self
                .controller
                .pointer_move(Self::day(&day)?, Self::px(&px)?),
            CalendarCommand::Up { day, px } => {
                let (day, px) = (Self::day(&day)?, Self::px(&px)?);
                self.controller.pointer_up(day, px, &mut self.ctx.store)
            }
            CalendarCommand::Delete(id) => {
                let id = id
                    .parse::<i32>()
                    .map_err(|_| Error::parse(format!("Invalid event id: '{id}'.")))?;
                self.controller.delete_event(id, &mut self.ctx.store)
            }
            CalendarCommand::Focus(state) => {
                self.controller.set_text_focus(state == "on");
                return Ok(None);
            }
            CalendarCommand::Log => {
                for line in self.logger.recent(LOG_LINES) {
                    println!("{line}");
                }
                return Ok(None);
            }
            CalendarCommand::ShowConfig => {
                self.dm.display_config(&self.ctx.config);
                return Ok(None);
            }
            CalendarCommand::Set { key, value } => {
                self.apply_setting(&key, &value)?;
                return Ok(None);
            }
            CalendarCommand::Help => {
                println!("{USAGE}");
                return Ok(None);
            }
        };
        Ok(Some(outcome))
    }

    /// Save a config change and rebuild everything that reads it. An open dialog or
    /// gesture survives the change.
    fn apply_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.ctx.config.set(key, value)?;
        if let Some((key, old, new)) = self.ctx.config.take_last_change() {
            self.logger.info(
                format!("Config {key} changed from '{old}' to '{new}'"),
                LogTarget::FileOnly,
            );
            self.status = Some(format!("{key} set to {new}."));
        }
        self.logger
            .set_file_logging_enabled(self.ctx.config.file_logging_enabled());
        self.engine = CalendarEngine::from_config(&self.ctx.config, self.logger.clone());
        self.controller.set_mapper(self.engine.mapper().clone());
        Ok(())
    }

    fn describe(outcome: &InteractionOutcome) -> Option<String> {
        match outcome {
            InteractionOutcome::Ignored | InteractionOutcome::Pending => None,
            InteractionOutcome::Navigated(_) | InteractionOutcome::ModeChanged(_) => None,
            InteractionOutcome::DialogOpened(_) | InteractionOutcome::QuickAddOpened(_) => None,
            InteractionOutcome::Discarded => Some("Discarded.".to_string()),
            InteractionOutcome::Committed(event) => Some(format!("Saved {event}")),
            InteractionOutcome::Deleted(id) => Some(format!("Deleted event with id {id}.")),
            InteractionOutcome::Failed(message) => Some(message.clone()),
        }
    }
}

impl<'a> Flow for CalendarFlow<'a> {
    fn render(&mut self) -> Result<()> {
        self.print_startup();
        let today = self.today;
        self.snapshot()?;
        if let Some(snapshot) = &self.snapshot {
            self.dm.display_snapshot(snapshot, today);
        }
        if let Some(status) = self.status.take() {
            println!("{status}");
        }
        self.print_modal();
        self.chrome.print_prompt("> ");
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        self.chrome.end_prompt();
        println!();
        let line = input.trim();
        if line.is_empty() {
            return Ok(FlowCtrl::Continue);
        }
        if line.eq_ignore_ascii_case("exit") {
            return Ok(FlowCtrl::Finish);
        }
        if !line.eq_ignore_ascii_case("log") {
            self.logger
                .info(format!("Command run: {line}"), LogTarget::FileOnly);
        }

        let result = parse_command(line).and_then(|command| self.run(command));
        match result {
            Ok(Some(outcome)) => {
                if let Some(text) = Self::describe(&outcome) {
                    self.status = Some(text);
                }
            }
            Ok(None) => {}
            Err(err) => {
                self.logger.error(
                    format!("Command failed for '{line}'. {err}"),
                    LogTarget::ConsoleAndFile,
                );
            }
        }
        // Any command may have changed the store, the view or the config.
        self.snapshot = None;
        Ok(FlowCtrl::Continue)
    }
}
