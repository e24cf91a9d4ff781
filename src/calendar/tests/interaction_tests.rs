use super::{at, day, monday, quiet_logger};
use crate::calendar::interaction::{
    CreateDialog, InteractionController, InteractionOutcome, QuickAddState, Session,
};
use crate::calendar::navigation::CalendarNav;
use crate::calendar::recurrence::expand;
use crate::calendar::time_grid::TimeGridMapper;
use crate::calendar::view_window::compute_window;
use crate::core::models::{
    BaseEvent, EventDraft, EventOccurrence, EventPatch, RecurrenceDescriptor,
};
use crate::core::store::{EventRepository, EventStore};
use crate::core::types::{ShortcutKey, ViewMode};
use crate::errors::{Error, Result};
use chrono::{Duration, NaiveDateTime};

/// Store that refuses every write.
struct OfflineStore {
    inner: EventRepository,
}

impl EventStore for OfflineStore {
    fn fetch(&self) -> Result<Vec<BaseEvent>> {
        self.inner.fetch()
    }
    fn get(&self, id: i32) -> Result<BaseEvent> {
        self.inner.get(id)
    }
    fn create(&mut self, _draft: EventDraft) -> Result<BaseEvent> {
        Err(Error::mutation("offline"))
    }
    fn update(&mut self, _id: i32, _patch: &EventPatch) -> Result<BaseEvent> {
        Err(Error::mutation("offline"))
    }
    fn delete(&mut self, _id: i32) -> Result<()> {
        Err(Error::mutation("offline"))
    }
}

fn controller() -> InteractionController {
    InteractionController::new(TimeGridMapper::default())
}

fn store_with(
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    rule: Option<&str>,
) -> EventRepository {
    let mut store = EventRepository::new();
    let mut draft = EventDraft::new(title, start, end);
    draft.recurrence = rule.map(RecurrenceDescriptor::new);
    store.create(draft).unwrap();
    store
}

fn occurrences(store: &EventRepository) -> Vec<EventOccurrence> {
    let mut occs = expand(
        &store.fetch().unwrap(),
        &compute_window(ViewMode::Month, monday()),
    );
    occs.sort_by_key(|o| o.start);
    occs
}

// ---- drag ----

#[test]
fn drag_monday_to_tuesday_snaps_and_keeps_duration() {
    let mut store = store_with("Review", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0), None);
    let occ = occurrences(&store).remove(0);
    let mut ctl = controller();

    // Grab 15 minutes below the top.
    assert_eq!(ctl.begin_drag(&occ, monday(), 512.5), InteractionOutcome::Pending);
    assert!(matches!(ctl.session(), Session::Dragging(d) if d.grab_offset_px == 12.5));
    assert_eq!(ctl.pointer_move(day(2025, 1, 7), 700.0), InteractionOutcome::Pending);

    // Pointer released at Tuesday 14:22.
    let outcome = ctl.pointer_up(day(2025, 1, 7), 718.3, &mut store);
    let InteractionOutcome::Committed(event) = &outcome else {
        panic!("expected commit, got {outcome:?}");
    };
    assert_eq!(event.start, at(2025, 1, 7, 14, 0));
    assert_eq!(event.end, at(2025, 1, 7, 15, 0));
    assert!(outcome.needs_refresh());
    assert_eq!(ctl.session(), &Session::Idle);
    assert_eq!(store.get(1).unwrap().start, at(2025, 1, 7, 14, 0));
}

#[test]
fn drag_of_expanded_instance_updates_the_source_event() {
    let mut store = store_with(
        "Standup",
        at(2025, 1, 6, 9, 0),
        at(2025, 1, 6, 9, 30),
        Some("FREQ=WEEKLY;BYDAY=MO"),
    );
    let instance = occurrences(&store)
        .into_iter()
        .find(|o| o.start == at(2025, 1, 13, 9, 0))
        .unwrap();
    assert!(instance.is_synthetic);

    let mut ctl = controller();
    ctl.begin_drag(&instance, day(2025, 1, 13), 450.0);
    let outcome = ctl.pointer_up(day(2025, 1, 14), 500.0, &mut store);

    let InteractionOutcome::Committed(event) = outcome else {
        panic!("expected commit");
    };
    assert_eq!(event.id, 1);
    assert_eq!(event.start, at(2025, 1, 14, 10, 0));
    assert_eq!(event.end, at(2025, 1, 14, 10, 30));
    assert!(event.recurrence.is_some());
    assert_eq!(store.len(), 1);
}

#[test]
fn failed_mutation_reports_error_and_clears_session() {
    let inner = store_with("Review", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0), None);
    let occ = occurrences(&inner).remove(0);
    let mut store = OfflineStore { inner };
    let logger = quiet_logger();
    let mut ctl = controller().with_logger(logger.clone());

    ctl.begin_drag(&occ, monday(), 500.0);
    let outcome = ctl.pointer_up(day(2025, 1, 8), 600.0, &mut store);

    assert_eq!(
        outcome,
        InteractionOutcome::Failed("Could not move event: Mutation failed: offline".into())
    );
    assert!(!outcome.needs_refresh());
    assert_eq!(ctl.session(), &Session::Idle);
    assert_eq!(store.get(1).unwrap().start, at(2025, 1, 6, 10, 0));
    assert!(logger.recent(1)[0].contains("ERROR"));
}

#[test]
fn drag_of_missing_event_fails_without_side_effects() {
    let mut store = EventRepository::new();
    let mut gone = BaseEvent::new("Ghost", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0));
    gone.id = 99;
    let ghost = EventOccurrence::from_base(&gone);
    let mut ctl = controller();
    ctl.begin_drag(&ghost, monday(), 500.0);
    let outcome = ctl.pointer_up(monday(), 600.0, &mut store);
    assert_eq!(
        outcome,
        InteractionOutcome::Failed("Could not move event: Event with id 99 not found.".into())
    );
    assert!(store.is_empty());
}

#[test]
fn escape_during_drag_discards_without_mutation() {
    let mut store = store_with("Review", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0), None);
    let occ = occurrences(&store).remove(0);
    let mut ctl = controller();

    ctl.begin_drag(&occ, monday(), 500.0);
    ctl.pointer_move(day(2025, 1, 9), 800.0);
    assert_eq!(ctl.cancel(), InteractionOutcome::Discarded);
    assert_eq!(ctl.session(), &Session::Idle);
    assert_eq!(ctl.pointer_up(day(2025, 1, 9), 800.0, &mut store), InteractionOutcome::Ignored);
    assert_eq!(store.get(1).unwrap().start, at(2025, 1, 6, 10, 0));
    assert_eq!(ctl.cancel(), InteractionOutcome::Ignored);
}

#[test]
fn starting_a_gesture_replaces_the_current_one() {
    let store = store_with("Review", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0), None);
    let occ = occurrences(&store).remove(0);
    let mut ctl = controller();

    ctl.begin_selection(monday());
    assert!(matches!(ctl.session(), Session::Selecting(_)));
    ctl.begin_resize(&occ, 550.0);
    assert!(matches!(ctl.session(), Session::Resizing(_)));
    ctl.begin_drag(&occ, monday(), 510.0);
    assert_eq!(ctl.session().name(), "dragging");
}

// ---- resize ----

#[test]
fn resize_below_minimum_keeps_twenty_four_minutes_and_start() {
    let mut store = store_with("Call", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0), None);
    let occ = occurrences(&store).remove(0);
    let mut ctl = controller();

    ctl.begin_resize(&occ, 550.0);
    // Bottom edge dragged up to 5 px below the top.
    let outcome = ctl.pointer_up(monday(), 505.0, &mut store);
    let InteractionOutcome::Committed(event) = outcome else {
        panic!("expected commit");
    };
    assert_eq!(event.start, at(2025, 1, 6, 10, 0));
    assert!(event.end - event.start >= Duration::minutes(24));
}

#[test]
fn resize_of_expanded_instance_changes_series_length() {
    let mut store = store_with(
        "Standup",
        at(2025, 1, 6, 9, 0),
        at(2025, 1, 6, 9, 30),
        Some("FREQ=WEEKLY;BYDAY=MO"),
    );
    let instance = occurrences(&store)
        .into_iter()
        .find(|o| o.start == at(2025, 1, 20, 9, 0))
        .unwrap();
    let mut ctl = controller();

    ctl.begin_resize(&instance, 475.0);
    ctl.pointer_move(day(2025, 1, 20), 510.0);
    // 75 px below 9:00 is 10:30.
    let outcome = ctl.pointer_up(day(2025, 1, 20), 525.0, &mut store);
    let InteractionOutcome::Committed(event) = outcome else {
        panic!("expected commit");
    };
    assert_eq!(event.start, at(2025, 1, 6, 9, 0));
    assert_eq!(event.end, at(2025, 1, 6, 10, 30));
}

// ---- selection and dialog ----

#[test]
fn month_selection_opens_all_day_dialog_then_creates() {
    let mut store = EventRepository::new();
    let mut ctl = controller();

    ctl.begin_selection(day(2025, 1, 8));
    ctl.pointer_move(day(2025, 1, 7), 0.0);
    let outcome = ctl.pointer_up(day(2025, 1, 6), 0.0, &mut store);
    let expected = CreateDialog {
        start: at(2025, 1, 6, 0, 0),
        end: at(2025, 1, 9, 0, 0),
        all_day: true,
    };
    assert_eq!(outcome, InteractionOutcome::DialogOpened(expected));
    assert_eq!(ctl.dialog(), Some(&expected));
    assert_eq!(ctl.session(), &Session::Idle);
    assert!(ctl.is_modal_open());

    let created = ctl.submit_dialog("Offsite", &mut store);
    let InteractionOutcome::Committed(event) = created else {
        panic!("expected commit");
    };
    assert!(event.all_day);
    assert_eq!(event.title, "Offsite");
    assert!(ctl.dialog().is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn dialog_failure_closes_dialog_and_reports() {
    let mut store = EventRepository::new();
    let mut ctl = controller();
    ctl.open_dialog_at(monday());
    let outcome = ctl.submit_dialog("   ", &mut store);
    assert_eq!(
        outcome,
        InteractionOutcome::Failed(
            "Could not create event: Mutation failed: Event title cannot be empty.".into()
        )
    );
    assert!(ctl.dialog().is_none());
    assert!(store.is_empty());
    assert_eq!(ctl.submit_dialog("Late", &mut store), InteractionOutcome::Ignored);
}

// ---- quick add ----

#[test]
fn quick_add_creates_sixty_minute_event_at_snapped_click() {
    let mut store = EventRepository::new();
    let mut ctl = controller();

    let outcome = ctl.click_empty_slot(day(2025, 1, 7), 504.0);
    let state = QuickAddState {
        start: at(2025, 1, 7, 10, 0),
        end: at(2025, 1, 7, 11, 0),
    };
    assert_eq!(outcome, InteractionOutcome::QuickAddOpened(state));
    assert!(ctl.is_modal_open());

    let InteractionOutcome::Committed(event) = ctl.confirm_quick_add("Coffee", &mut store) else {
        panic!("expected commit");
    };
    assert_eq!((event.start, event.end), (state.start, state.end));
    assert_eq!(ctl.session(), &Session::Idle);
    assert_eq!(ctl.confirm_quick_add("Again", &mut store), InteractionOutcome::Ignored);
}

#[test]
fn quick_add_cancel_and_click_outside_discard() {
    let mut store = EventRepository::new();
    let mut ctl = controller();

    ctl.click_empty_slot(monday(), 300.0);
    assert_eq!(ctl.cancel(), InteractionOutcome::Discarded);

    ctl.click_empty_slot(monday(), 300.0);
    // Pointer-down elsewhere closes the popover instead of starting a gesture.
    assert_eq!(ctl.begin_selection(monday()), InteractionOutcome::Discarded);
    assert_eq!(ctl.session(), &Session::Idle);
    assert_eq!(ctl.pointer_up(monday(), 0.0, &mut store), InteractionOutcome::Ignored);
    assert!(store.is_empty());
}

// ---- keyboard ----

#[test]
fn shortcuts_navigate_and_switch_modes() {
    let today = day(2025, 1, 8);
    let mut nav = CalendarNav::new(ViewMode::Week, today);
    let mut ctl = controller();

    assert_eq!(
        ctl.handle_key(ShortcutKey::Right, &mut nav, today),
        InteractionOutcome::Navigated(day(2025, 1, 15))
    );
    assert_eq!(
        ctl.handle_key(ShortcutKey::M, &mut nav, today),
        InteractionOutcome::ModeChanged(ViewMode::Month)
    );
    assert_eq!(
        ctl.handle_key(ShortcutKey::Left, &mut nav, today),
        InteractionOutcome::Navigated(day(2024, 12, 15))
    );
    assert_eq!(
        ctl.handle_key(ShortcutKey::T, &mut nav, today),
        InteractionOutcome::Navigated(today)
    );
    assert_eq!(
        ctl.handle_key(ShortcutKey::W, &mut nav, today),
        InteractionOutcome::ModeChanged(ViewMode::Week)
    );
    assert_eq!(nav.mode, ViewMode::Week);
}

#[test]
fn n_opens_dialog_at_selected_date() {
    let today = day(2025, 1, 8);
    let mut nav = CalendarNav::new(ViewMode::Month, today);
    nav.select(day(2025, 1, 20));
    let mut ctl = controller();

    let outcome = ctl.handle_key(ShortcutKey::N, &mut nav, today);
    assert_eq!(
        outcome,
        InteractionOutcome::DialogOpened(CreateDialog {
            start: at(2025, 1, 20, 9, 0),
            end: at(2025, 1, 20, 10, 0),
            all_day: false,
        })
    );
}

#[test]
fn shortcuts_are_ignored_while_modal_open_or_text_focused() {
    let today = day(2025, 1, 8);
    let mut nav = CalendarNav::new(ViewMode::Week, today);
    let mut ctl = controller();

    ctl.open_dialog_at(today);
    assert_eq!(
        ctl.handle_key(ShortcutKey::Right, &mut nav, today),
        InteractionOutcome::Ignored
    );
    ctl.cancel();

    ctl.set_text_focus(true);
    assert_eq!(
        ctl.handle_key(ShortcutKey::M, &mut nav, today),
        InteractionOutcome::Ignored
    );
    assert_eq!(nav.mode, ViewMode::Week);
    assert_eq!(nav.anchor, today);

    ctl.set_text_focus(false);
    assert_eq!(
        ctl.handle_key(ShortcutKey::M, &mut nav, today),
        InteractionOutcome::ModeChanged(ViewMode::Month)
    );
}

// ---- delete ----

#[test]
fn delete_reports_success_and_failure() {
    let mut store = store_with("Review", at(2025, 1, 6, 10, 0), at(2025, 1, 6, 11, 0), None);
    let mut ctl = controller();
    let deleted = ctl.delete_event(1, &mut store);
    assert_eq!(deleted, InteractionOutcome::Deleted(1));
    assert!(deleted.needs_refresh());
    assert_eq!(
        ctl.delete_event(1, &mut store),
        InteractionOutcome::Failed("Could not delete event: Event with id 1 not found.".into())
    );
}
