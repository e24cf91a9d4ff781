use crate::calendar::view_window::ViewWindow;
use crate::core::models::{BaseEvent, EventOccurrence, RecurrenceDescriptor};
use crate::errors::{Error, Result};
use chrono::{Duration, NaiveDateTime, Utc};
use rrule::RRuleSet;

/// Most instances generated for one event per query.
pub const EXPANSION_LIMIT: u16 = 1000;

/// Receives what happened to each recurring event during expansion.
pub trait ExpansionObserver {
    fn rule_rejected(&self, event: &BaseEvent, error: &Error);

    fn event_expanded(&self, _event_id: i32, _instances: usize, _limited: bool) {}
}

pub struct SilentObserver;

impl ExpansionObserver for SilentObserver {
    fn rule_rejected(&self, _event: &BaseEvent, _error: &Error) {}
}

/// Rule starts returned by one generator query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStarts {
    pub starts: Vec<NaiveDateTime>,
    /// The query stopped at the instance limit.
    pub limited: bool,
}

/// UNTIL in the same UTC-tagged wall clock as DTSTART. A floating date-time gains
/// a `Z`; a bare date covers that whole day.
fn normalize_until(body: &str) -> String {
    body.split(';')
        .map(|part| match part.split_once('=') {
            Some((key, value)) if key.trim().eq_ignore_ascii_case("UNTIL") => {
                let value = value.trim();
                let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
                match value.split_once(['T', 't']) {
                    None if value.len() == 8 && is_digits(value) => {
                        format!("UNTIL={value}T235959Z")
                    }
                    Some((date, time)) if is_digits(date) && is_digits(time) => {
                        format!("UNTIL={date}T{time}Z")
                    }
                    _ => part.to_string(),
                }
            }
            _ => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// DTSTART uses the event's wall clock as a UTC value so no zone shifting happens.
fn build_rule_string(event: &BaseEvent, rule: &RecurrenceDescriptor) -> String {
    format!(
        "DTSTART:{}Z\nRRULE:{}",
        event.start.format("%Y%m%dT%H%M%S"),
        normalize_until(rule.rule_body())
    )
}

/// All starts of `event`'s rule within `[from, to]`, both ends inclusive.
pub fn rule_starts(
    event: &BaseEvent,
    rule: &RecurrenceDescriptor,
    from: NaiveDateTime,
    to: NaiveDateTime,
    limit: u16,
) -> Result<RuleStarts> {
    let rule_set = build_rule_string(event, rule)
        .parse::<RRuleSet>()
        .map_err(|e| Error::Recurrence {
            event_id: event.id,
            reason: e.to_string(),
        })?;

    // `after`/`before` are exclusive; widen by a second and filter exactly below.
    let tz: rrule::Tz = Utc.into();
    let after = (from - Duration::seconds(1)).and_utc().with_timezone(&tz);
    let before = (to + Duration::seconds(1)).and_utc().with_timezone(&tz);

    // One extra instance tells a rule cut at the limit from one that ends there.
    let result = rule_set
        .after(after)
        .before(before)
        .all(limit.saturating_add(1));
    let limited = result.limited;
    let starts = result
        .dates
        .iter()
        .take(usize::from(limit))
        .map(|dt| dt.naive_utc())
        .filter(|s| *s >= from && *s <= to)
        .collect();

    Ok(RuleStarts { starts, limited })
}

/// Turns stored events into the concrete occurrences visible in a window.
pub struct RecurrenceExpander<'a> {
    observer: &'a dyn ExpansionObserver,
    limit: u16,
}

impl Default for RecurrenceExpander<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RecurrenceExpander<'a> {
    pub fn new() -> Self {
        Self {
            observer: &SilentObserver,
            limit: EXPANSION_LIMIT,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ExpansionObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    /// Non-recurring events pass through untouched. A rule that cannot be
    /// parsed is reported to the observer and its event is shown once.
    pub fn expand(&self, events: &[BaseEvent], window: &ViewWindow) -> Vec<EventOccurrence> {
        let mut out = Vec::with_capacity(events.len());

        for event in events {
            let Some(rule) = &event.recurrence else {
                out.push(EventOccurrence::from_base(event));
                continue;
            };

            let duration = event.duration();
            match rule_starts(event, rule, window.start - duration, window.end, self.limit) {
                Ok(RuleStarts { starts, limited }) => {
                    let before = out.len();
                    out.extend(
                        starts
                            .into_iter()
                            .filter(|s| *s + duration >= window.start && *s <= window.end)
                            .map(|s| EventOccurrence::instance_of(event, s)),
                    );
                    self.observer
                        .event_expanded(event.id, out.len() - before, limited);
                }
                Err(err) => {
                    self.observer.rule_rejected(event, &err);
                    out.push(EventOccurrence::from_base(event));
                }
            }
        }

        out
    }
}

pub fn expand(events: &[BaseEvent], window: &ViewWindow) -> Vec<EventOccurrence> {
    RecurrenceExpander::new().expand(events, window)
}
