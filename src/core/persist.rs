use crate::core::models::BaseEvent;
use crate::core::repository::Repository;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EventsFile {
    #[serde(default)]
    pub events: Vec<BaseEvent>,
}

pub fn save_events(events: &Repository<BaseEvent>, path: &Path) -> Result<PathBuf> {
    let file = EventsFile {
        events: events.values().into_iter().cloned().collect(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(&file)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

/// Events stored at `path`; a missing file reads as empty.
pub fn load_events(path: &Path) -> Result<Vec<BaseEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    let file: EventsFile = serde_json::from_str(&contents)?;
    Ok(file.events)
}
