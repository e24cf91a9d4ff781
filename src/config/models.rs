use crate::core::types::{Bool, ViewMode};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultViewConfigItem {
    pub value: ViewMode,
    pub description: String,
}
impl ConfigItem<ViewMode> for DefaultViewConfigItem {
    fn get_value(&self) -> &ViewMode {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = ViewMode::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Whole-number item accepted only inside `MIN..=MAX`.
macro_rules! bounded_config_item {
    ($name:ident, $label:literal, $default:expr, $min:expr, $max:expr, $desc:literal) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct $name {
            pub value: u32,
            pub description: String,
        }

        impl $name {
            pub const MIN: u32 = $min;
            pub const MAX: u32 = $max;
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    value: $default,
                    description: $desc.into(),
                }
            }
        }

        impl ConfigItem<u32> for $name {
            fn get_value(&self) -> &u32 {
                &self.value
            }
            fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
                let parsed = new_value.trim().parse::<u32>().map_err(|_| {
                    Error::Parse(format!(
                        "Invalid {}: '{}'. Expected a whole number.",
                        $label,
                        new_value.trim()
                    ))
                })?;
                if !(Self::MIN..=Self::MAX).contains(&parsed) {
                    return Err(Error::Parse(format!(
                        "Invalid {}: {}. Must be between {} and {}.",
                        $label,
                        parsed,
                        Self::MIN,
                        Self::MAX
                    )));
                }
                self.value = parsed;
                Ok(())
            }
            fn description(&self) -> &str {
                &self.description
            }
        }
    };
}

bounded_config_item!(
    PixelsPerHourConfigItem,
    "pixels per hour",
    50,
    12,
    240,
    "Height in pixels of one hour in the week time grid."
);
bounded_config_item!(
    SnapMinutesConfigItem,
    "snap minutes",
    15,
    1,
    60,
    "Minute increment that dropped and resized events snap to."
);
bounded_config_item!(
    QuickAddMinutesConfigItem,
    "quick add minutes",
    60,
    5,
    1440,
    "Length of an event created by clicking an empty time slot."
);
bounded_config_item!(
    MonthCellLimitConfigItem,
    "month cell limit",
    3,
    1,
    10,
    "Events listed in a month cell before '+N more'."
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
