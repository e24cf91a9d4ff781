pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::calendar::time_grid::GridScale;
use crate::config::models::{
    ConfigItem, DefaultViewConfigItem, FileLoggingConfigItem, MonthCellLimitConfigItem,
    PixelsPerHourConfigItem, QuickAddMinutesConfigItem, SnapMinutesConfigItem,
};
use crate::core::types::ViewMode;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    DefaultView,
    PixelsPerHour,
    SnapMinutes,
    QuickAddMinutes,
    MonthCellLimit,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub default_view: DefaultViewConfigItem,
    #[serde(default)]
    pub pixels_per_hour: PixelsPerHourConfigItem,
    #[serde(default)]
    pub snap_minutes: SnapMinutesConfigItem,
    #[serde(default)]
    pub quick_add_minutes: QuickAddMinutesConfigItem,
    #[serde(default)]
    pub month_cell_limit: MonthCellLimitConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

/// `(key, old value, new value)` of the last successful edit.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<ConfigChange>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
    pub fn get(&self, index: usize) -> Option<&(String, String, String)> {
        self.0.get(index)
    }
}
impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn default_view(&self) -> ViewMode {
        *self.data.default_view.get_value()
    }
    pub fn pixels_per_hour(&self) -> u32 {
        *self.data.pixels_per_hour.get_value()
    }
    pub fn snap_minutes(&self) -> u32 {
        *self.data.snap_minutes.get_value()
    }
    pub fn quick_add_minutes(&self) -> u32 {
        *self.data.quick_add_minutes.get_value()
    }
    pub fn month_cell_limit(&self) -> usize {
        *self.data.month_cell_limit.get_value() as usize
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn grid_scale(&self) -> GridScale {
        GridScale::new(
            f64::from(self.pixels_per_hour()),
            self.snap_minutes(),
            self.quick_add_minutes(),
        )
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::DefaultView => self.data.default_view.description(),
            ConfigKey::PixelsPerHour => self.data.pixels_per_hour.description(),
            ConfigKey::SnapMinutes => self.data.snap_minutes.description(),
            ConfigKey::QuickAddMinutes => self.data.quick_add_minutes.description(),
            ConfigKey::MonthCellLimit => self.data.month_cell_limit.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
        }
    }

    fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::DefaultView => self.default_view().to_string(),
            ConfigKey::PixelsPerHour => self.pixels_per_hour().to_string(),
            ConfigKey::SnapMinutes => self.snap_minutes().to_string(),
            ConfigKey::QuickAddMinutes => self.quick_add_minutes().to_string(),
            ConfigKey::MonthCellLimit => self.month_cell_limit().to_string(),
            ConfigKey::FileLoggingEnabled => {
                self.data.file_logging_enabled.get_value().to_string()
            }
        }
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    (
                        key.to_string(),
                        self.description_of(key).to_string(),
                        self.value_of(key),
                    )
                })
                .collect(),
        )
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_of(key);
        self.edit(|cfg| match key {
            ConfigKey::DefaultView => cfg.default_view.set_value(new_value),
            ConfigKey::PixelsPerHour => cfg.pixels_per_hour.set_value(new_value),
            ConfigKey::SnapMinutes => cfg.snap_minutes.set_value(new_value),
            ConfigKey::QuickAddMinutes => cfg.quick_add_minutes.set_value(new_value),
            ConfigKey::MonthCellLimit => cfg.month_cell_limit.set_value(new_value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(new_value),
        })?;
        self.last_change = Some((key.to_string(), old, self.value_of(key)));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str.trim(),
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    /// Apply to a copy first so a rejected value leaves memory and disk untouched.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut next = self.data.clone();
        f(&mut next)?;
        let previous = std::mem::replace(&mut self.data, next);
        if let Err(e) = self.save() {
            self.data = previous;
            return Err(e);
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
