use crate::calendar::navigation::CalendarNav;
use crate::calendar::time_grid::TimeGridMapper;
use crate::core::models::{BaseEvent, EventDraft, EventOccurrence, EventPatch};
use crate::core::store::EventStore;
use crate::core::types::{ShortcutKey, ViewMode};
use crate::errors::Result;
use crate::extensions::chrono::NaiveDateExt;
use crate::logging::{LogTarget, Logger};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Hour the create dialog opened from the keyboard starts at.
pub const DIALOG_DEFAULT_HOUR: u32 = 9;

/// Month-grid drag-to-create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor: NaiveDate,
    pub current: NaiveDate,
}

impl SelectionState {
    /// Whole days from the earlier to the later end, as `[start, end)`.
    pub fn range(&self) -> (NaiveDateTime, NaiveDateTime) {
        let (first, last) = if self.anchor <= self.current {
            (self.anchor, self.current)
        } else {
            (self.current, self.anchor)
        };
        (first.midnight(), (last + Duration::days(1)).midnight())
    }
}

/// The occurrence a gesture started on, resolved to the stored event it edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTarget {
    pub occurrence_id: String,
    pub source_event_id: i32,
    pub is_synthetic: bool,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl From<&EventOccurrence> for GestureTarget {
    fn from(occ: &EventOccurrence) -> Self {
        Self {
            occurrence_id: occ.id.clone(),
            source_event_id: occ.source_event_id,
            is_synthetic: occ.is_synthetic,
            start: occ.start,
            end: occ.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub target: GestureTarget,
    /// Pointer distance below the block's top when grabbed.
    pub grab_offset_px: f64,
    pub current_day: NaiveDate,
    pub current_px: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub target: GestureTarget,
    pub top_px: f64,
    pub current_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAddState {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// At most one gesture is live; starting another replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Idle,
    Selecting(SelectionState),
    Dragging(DragState),
    Resizing(ResizeState),
    QuickAdding(QuickAddState),
}

impl Session {
    pub fn name(&self) -> &'static str {
        match self {
            Session::Idle => "idle",
            Session::Selecting(_) => "selecting",
            Session::Dragging(_) => "dragging",
            Session::Resizing(_) => "resizing",
            Session::QuickAdding(_) => "quick-adding",
        }
    }
}

/// Modal create form, prefilled with a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateDialog {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing happened (no session, or input blocked by a modal or text focus).
    Ignored,
    /// A gesture started or moved.
    Pending,
    /// State thrown away without side effects.
    Discarded,
    DialogOpened(CreateDialog),
    QuickAddOpened(QuickAddState),
    /// The store accepted a create/update; the view should re-fetch.
    Committed(BaseEvent),
    Deleted(i32),
    Failed(String),
    Navigated(NaiveDate),
    ModeChanged(ViewMode),
}

impl InteractionOutcome {
    pub fn needs_refresh(&self) -> bool {
        matches!(
            self,
            InteractionOutcome::Committed(_) | InteractionOutcome::Deleted(_)
        )
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    session: Session,
    dialog: Option<CreateDialog>,
    text_focused: bool,
    mapper: TimeGridMapper,
    logger: Option<Logger>,
}

impl InteractionController {
    pub fn new(mapper: TimeGridMapper) -> Self {
        Self {
            mapper,
            ..Self::default()
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dialog(&self) -> Option<&CreateDialog> {
        self.dialog.as_ref()
    }

    pub fn mapper(&self) -> &TimeGridMapper {
        &self.mapper
    }

    /// Swap the grid scale. Session, dialog and focus are kept; pixels passed
    /// from now on are read with the new scale.
    pub fn set_mapper(&mut self, mapper: TimeGridMapper) {
        self.mapper = mapper;
    }

    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focused = focused;
    }

    pub fn is_text_focused(&self) -> bool {
        self.text_focused
    }

    /// A dialog or the quick-add popover is showing.
    pub fn is_modal_open(&self) -> bool {
        self.dialog.is_some() || matches!(self.session, Session::QuickAdding(_))
    }

    fn info(&self, message: String) {
        if let Some(logger) = &self.logger {
            logger.info(message, LogTarget::FileOnly);
        }
    }

    fn fail(&self, message: String) -> InteractionOutcome {
        if let Some(logger) = &self.logger {
            logger.error(&message, LogTarget::FileOnly);
        }
        InteractionOutcome::Failed(message)
    }

    /// `verb` is the bare action name: "move", "resize", "create".
    fn finish(&self, result: Result<BaseEvent>, verb: &str) -> InteractionOutcome {
        match result {
            Ok(event) => {
                self.info(format!("Saved {verb} of event with id {}", event.id));
                InteractionOutcome::Committed(event)
            }
            Err(err) => self.fail(format!("Could not {verb} event: {err}")),
        }
    }

    // ---- keyboard ------------------------------------------------------------

    pub fn handle_key(
        &mut self,
        key: ShortcutKey,
        nav: &mut CalendarNav,
        today: NaiveDate,
    ) -> InteractionOutcome {
        if self.is_modal_open() || self.text_focused {
            return InteractionOutcome::Ignored;
        }
        match key {
            ShortcutKey::N => self.open_dialog_at(nav.selected),
            ShortcutKey::T => {
                nav.today(today);
                InteractionOutcome::Navigated(nav.anchor)
            }
            ShortcutKey::W => {
                nav.set_mode(ViewMode::Week);
                InteractionOutcome::ModeChanged(ViewMode::Week)
            }
            ShortcutKey::M => {
                nav.set_mode(ViewMode::Month);
                InteractionOutcome::ModeChanged(ViewMode::Month)
            }
            ShortcutKey::Left => {
                nav.previous();
                InteractionOutcome::Navigated(nav.anchor)
            }
            ShortcutKey::Right => {
                nav.next();
                InteractionOutcome::Navigated(nav.anchor)
            }
        }
    }

    /// Create dialog on `day` at the default hour, quick-add length.
    pub fn open_dialog_at(&mut self, day: NaiveDate) -> InteractionOutcome {
        let start = day.and_time(
            NaiveTime::from_hms_opt(DIALOG_DEFAULT_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
        );
        let end = start + Duration::minutes(self.mapper.scale().quick_add_minutes as i64);
        self.open_dialog(CreateDialog {
            start,
            end,
            all_day: false,
        })
    }

    fn open_dialog(&mut self, dialog: CreateDialog) -> InteractionOutcome {
        self.session = Session::Idle;
        self.dialog = Some(dialog);
        InteractionOutcome::DialogOpened(dialog)
    }

    // ---- pointer ------------------------------------------------------------

    /// Pointer-down while a dialog or popover is open counts as clicking outside it.
    fn dismiss_if_modal(&mut self) -> bool {
        if self.is_modal_open() {
            self.dialog = None;
            self.session = Session::Idle;
            self.info("Dismissed open dialog".to_string());
            true
        } else {
            false
        }
    }

    pub fn begin_selection(&mut self, day: NaiveDate) -> InteractionOutcome {
        if self.dismiss_if_modal() {
            return InteractionOutcome::Discarded;
        }
        self.session = Session::Selecting(SelectionState {
            anchor: day,
            current: day,
        });
        InteractionOutcome::Pending
    }

    pub fn begin_drag(
        &mut self,
        occ: &EventOccurrence,
        day: NaiveDate,
        pointer_px: f64,
    ) -> InteractionOutcome {
        if self.dismiss_if_modal() {
            return InteractionOutcome::Discarded;
        }
        let top = if occ.start.date() == day {
            self.mapper.time_to_offset_px(occ.start)
        } else {
            0.0
        };
        self.session = Session::Dragging(DragState {
            target: GestureTarget::from(occ),
            grab_offset_px: (pointer_px - top).max(0.0),
            current_day: day,
            current_px: pointer_px,
        });
        InteractionOutcome::Pending
    }

    pub fn begin_resize(&mut self, occ: &EventOccurrence, pointer_px: f64) -> InteractionOutcome {
        if self.dismiss_if_modal() {
            return InteractionOutcome::Discarded;
        }
        self.session = Session::Resizing(ResizeState {
            target: GestureTarget::from(occ),
            top_px: self.mapper.time_to_offset_px(occ.start),
            current_px: pointer_px,
        });
        InteractionOutcome::Pending
    }

    pub fn pointer_move(&mut self, day: NaiveDate, px: f64) -> InteractionOutcome {
        match &mut self.session {
            Session::Selecting(sel) => sel.current = day,
            Session::Dragging(drag) => {
                drag.current_day = day;
                drag.current_px = px;
            }
            Session::Resizing(resize) => resize.current_px = px,
            Session::Idle | Session::QuickAdding(_) => return InteractionOutcome::Ignored,
        }
        InteractionOutcome::Pending
    }

    /// Ends the live gesture at `(day, px)`. The session is cleared whatever the store says.
    pub fn pointer_up(
        &mut self,
        day: NaiveDate,
        px: f64,
        store: &mut dyn EventStore,
    ) -> InteractionOutcome {
        match std::mem::take(&mut self.session) {
            Session::Selecting(mut sel) => {
                sel.current = day;
                let (start, end) = sel.range();
                self.open_dialog(CreateDialog {
                    start,
                    end,
                    all_day: true,
                })
            }
            Session::Dragging(drag) => {
                self.commit_move(&drag.target, day, px, drag.grab_offset_px, store)
            }
            Session::Resizing(resize) => {
                self.commit_resize(&resize.target, px - resize.top_px, store)
            }
            session @ Session::QuickAdding(_) => {
                self.session = session;
                InteractionOutcome::Ignored
            }
            Session::Idle => InteractionOutcome::Ignored,
        }
    }

    fn commit_move(
        &self,
        target: &GestureTarget,
        day: NaiveDate,
        drop_px: f64,
        grab_offset_px: f64,
        store: &mut dyn EventStore,
    ) -> InteractionOutcome {
        let duration = target.end - target.start;
        let (start, end) = self.mapper.move_to(duration, day, drop_px, grab_offset_px);
        let result = store.update(target.source_event_id, &EventPatch::times(start, end));
        self.finish(result, "move")
    }

    /// Only the end changes. An expanded instance carries its new length back to the series.
    fn commit_resize(
        &self,
        target: &GestureTarget,
        height_px: f64,
        store: &mut dyn EventStore,
    ) -> InteractionOutcome {
        let new_end = self.mapper.resize_end(target.start, height_px);
        let duration = new_end - target.start;
        let result = store.get(target.source_event_id).and_then(|base| {
            store.update(
                target.source_event_id,
                &EventPatch::end_only(base.start + duration),
            )
        });
        self.finish(result, "resize")
    }

    // ---- quick add ------------------------------------------------------------

    /// Single click on an empty slot opens the quick-add popover.
    pub fn click_empty_slot(&mut self, day: NaiveDate, px: f64) -> InteractionOutcome {
        if self.dismiss_if_modal() {
            return InteractionOutcome::Discarded;
        }
        let (start, end) = self.mapper.quick_add_range(day, px);
        let state = QuickAddState { start, end };
        self.session = Session::QuickAdding(state);
        InteractionOutcome::QuickAddOpened(state)
    }

    pub fn confirm_quick_add(
        &mut self,
        title: &str,
        store: &mut dyn EventStore,
    ) -> InteractionOutcome {
        let Session::QuickAdding(state) = self.session else {
            return InteractionOutcome::Ignored;
        };
        self.session = Session::Idle;
        let result = store.create(EventDraft::new(title.trim(), state.start, state.end));
        self.finish(result, "create")
    }

    // ---- dialog ---------------------------------------------------------------

    pub fn submit_dialog(
        &mut self,
        title: &str,
        store: &mut dyn EventStore,
    ) -> InteractionOutcome {
        let Some(dialog) = self.dialog.take() else {
            return InteractionOutcome::Ignored;
        };
        let mut draft = EventDraft::new(title.trim(), dialog.start, dialog.end);
        draft.all_day = dialog.all_day;
        let result = store.create(draft);
        self.finish(result, "create")
    }

    /// Escape: drop any gesture, popover or dialog.
    pub fn cancel(&mut self) -> InteractionOutcome {
        let had_dialog = self.dialog.take().is_some();
        let had_session = !matches!(std::mem::take(&mut self.session), Session::Idle);
        if had_dialog || had_session {
            InteractionOutcome::Discarded
        } else {
            InteractionOutcome::Ignored
        }
    }

    pub fn delete_event(&mut self, id: i32, store: &mut dyn EventStore) -> InteractionOutcome {
        match store.delete(id) {
            Ok(()) => {
                self.info(format!("Deleted event with id {id}"));
                InteractionOutcome::Deleted(id)
            }
            Err(err) => self.fail(format!("Could not delete event: {err}")),
        }
    }
}
