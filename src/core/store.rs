use crate::core::models::{BaseEvent, EventDraft, EventPatch};
use crate::core::persist;
use crate::core::repository::Repository;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

/// Persistence collaborator the calendar reads from and writes mutations to.
pub trait EventStore {
    fn fetch(&self) -> Result<Vec<BaseEvent>>;
    fn get(&self, id: i32) -> Result<BaseEvent>;
    fn create(&mut self, draft: EventDraft) -> Result<BaseEvent>;
    fn update(&mut self, id: i32, patch: &EventPatch) -> Result<BaseEvent>;
    fn delete(&mut self, id: i32) -> Result<()>;
}

/// Repository-backed store, optionally mirrored to a JSON file after every change.
/// A change that cannot be written is undone in memory too.
#[derive(Debug, Default)]
pub struct EventRepository {
    events: Repository<BaseEvent>,
    path: Option<PathBuf>,
}

impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` (missing file is fine) and keep writing back to it.
    pub fn open(path: &Path) -> Result<Self> {
        let mut events = Repository::new();
        for event in persist::load_events(path)? {
            validate(&event)?;
            events.insert_with_id(event)?;
        }
        Ok(Self {
            events,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn flush(&self) -> Result<()> {
        if let Some(path) = &self.path {
            persist::save_events(&self.events, path)?;
        }
        Ok(())
    }
}

fn validate(event: &BaseEvent) -> Result<()> {
    if event.title.trim().is_empty() {
        return Err(Error::mutation("Event title cannot be empty."));
    }
    if event.end < event.start {
        return Err(Error::mutation(format!(
            "Event '{}' ends before it starts ({} < {}).",
            event.title,
            event.end.format("%Y-%m-%d %H:%M"),
            event.start.format("%Y-%m-%d %H:%M")
        )));
    }
    Ok(())
}

impl EventStore for EventRepository {
    fn fetch(&self) -> Result<Vec<BaseEvent>> {
        Ok(self
            .events
            .values()
            .into_iter()
            .cloned()
            .collect())
    }

    fn get(&self, id: i32) -> Result<BaseEvent> {
        self.events.get(id).cloned()
    }

    fn create(&mut self, draft: EventDraft) -> Result<BaseEvent> {
        let event = draft.into_event();
        validate(&event)?;
        let created = self.events.insert(event).clone();
        if let Err(e) = self.flush() {
            self.events.delete(created.id)?;
            return Err(e);
        }
        Ok(created)
    }

    fn update(&mut self, id: i32, patch: &EventPatch) -> Result<BaseEvent> {
        let mut updated = self.events.get(id)?.clone();
        updated.apply(patch);
        validate(&updated)?;
        let previous = std::mem::replace(self.events.get_mut(id)?, updated.clone());
        if let Err(e) = self.flush() {
            *self.events.get_mut(id)? = previous;
            return Err(e);
        }
        Ok(updated)
    }

    fn delete(&mut self, id: i32) -> Result<()> {
        let removed = self.events.delete(id)?;
        if let Err(e) = self.flush() {
            self.events.insert_with_id(removed)?;
            return Err(e);
        }
        Ok(())
    }
}
