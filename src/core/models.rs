use crate::core::types::EventCategory;
use crate::extensions::chrono::NaiveDateTimeExt;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait BaseEntity {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

/// RRULE text. The anchor (DTSTART) is always the owning event's start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceDescriptor {
    pub rule: String,
}

impl RecurrenceDescriptor {
    pub fn new(rule: impl Into<String>) -> Self {
        Self { rule: rule.into() }
    }

    /// Rule body without an optional leading `RRULE:`.
    pub fn rule_body(&self) -> &str {
        let trimmed = self.rule.trim();
        trimmed
            .strip_prefix("RRULE:")
            .or_else(|| trimmed.strip_prefix("rrule:"))
            .unwrap_or(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEvent {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub team_id: Option<i32>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceDescriptor>,
}

impl BaseEvent {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: 1,
            title: title.into(),
            description: String::new(),
            start,
            end,
            location: String::new(),
            category: EventCategory::default(),
            all_day: false,
            team_id: None,
            recurrence: None,
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurrence = Some(RecurrenceDescriptor::new(rule));
        self
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Apply the fields present in `patch`.
    pub fn apply(&mut self, patch: &EventPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(all_day) = patch.all_day {
            self.all_day = all_day;
        }
        if let Some(recurrence) = &patch.recurrence {
            self.recurrence = recurrence.clone();
        }
    }
}

impl BaseEntity for BaseEvent {
    fn id(&self) -> i32 {
        self.id
    }
    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl fmt::Display for BaseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event(id={}, title='{}', start={}, end={}, category={}, rule={})",
            self.id,
            self.title,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M"),
            self.category,
            self.recurrence
                .as_ref()
                .map(|r| r.rule.as_str())
                .unwrap_or("-")
        )
    }
}

/// What the create dialog / quick-add popover submits. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub category: EventCategory,
    pub all_day: bool,
    pub team_id: Option<i32>,
    pub recurrence: Option<RecurrenceDescriptor>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end,
            location: String::new(),
            category: EventCategory::default(),
            all_day: false,
            team_id: None,
            recurrence: None,
        }
    }

    pub fn into_event(self) -> BaseEvent {
        BaseEvent {
            id: 1,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            location: self.location,
            category: self.category,
            all_day: self.all_day,
            team_id: self.team_id,
            recurrence: self.recurrence,
        }
    }
}

/// Partial update. `None` leaves a field untouched; `recurrence: Some(None)` clears the rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub all_day: Option<bool>,
    pub recurrence: Option<Option<RecurrenceDescriptor>>,
}

impl EventPatch {
    pub fn times(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn end_only(end: NaiveDateTime) -> Self {
        Self {
            end: Some(end),
            ..Self::default()
        }
    }
}

/// One concrete instance of a (possibly recurring) event. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOccurrence {
    /// `"{source}_{start millis}"` for expanded instances, the plain source id otherwise.
    pub id: String,
    pub source_event_id: i32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: EventCategory,
    pub all_day: bool,
    pub team_id: Option<i32>,
    pub recurrence: Option<RecurrenceDescriptor>,
    pub is_synthetic: bool,
}

impl EventOccurrence {
    /// The event as-is, keeping its own id.
    pub fn from_base(event: &BaseEvent) -> Self {
        Self::build(event, event.id.to_string(), event.start, event.end, false)
    }

    /// An expanded instance starting at `start`, preserving the source duration.
    pub fn instance_of(event: &BaseEvent, start: NaiveDateTime) -> Self {
        let id = virtual_id(event.id, start);
        Self::build(event, id, start, start + event.duration(), true)
    }

    fn build(
        event: &BaseEvent,
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
        is_synthetic: bool,
    ) -> Self {
        Self {
            id,
            source_event_id: event.id,
            start,
            end,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            category: event.category,
            all_day: event.all_day,
            team_id: event.team_id,
            recurrence: event.recurrence.clone(),
            is_synthetic,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap with `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end > start
    }
}

impl fmt::Display for EventOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.id,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M"),
            self.title
        )
    }
}

pub fn virtual_id(source_event_id: i32, start: NaiveDateTime) -> String {
    format!("{}_{}", source_event_id, start.epoch_millis())
}
