use crate::errors::{Error, Result};
use crate::extensions::enums::{parse_named, valid_csv};
use crate::extensions::string::{KeyName, ToDashSeparators};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Month,
}

impl ViewMode {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_named(s, "view mode")
    }

    /// Cells the grid draws for this mode.
    pub fn grid_days(self) -> usize {
        match self {
            ViewMode::Week => 7,
            ViewMode::Month => 42,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Work,
    Meeting,
    Personal,
    Appointment,
    #[default]
    Other,
}

impl EventCategory {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_named(s, "event category")
    }

    pub const RESET: &'static str = crate::csi!("0m");

    /// Single-letter marker used in the terminal grid.
    pub fn marker(self) -> char {
        match self {
            EventCategory::Work => 'W',
            EventCategory::Meeting => 'M',
            EventCategory::Personal => 'P',
            EventCategory::Appointment => 'A',
            EventCategory::Other => 'O',
        }
    }

    pub fn ansi_fg(self) -> &'static str {
        match self {
            EventCategory::Work => crate::csi!("34m"),
            EventCategory::Meeting => crate::csi!("35m"),
            EventCategory::Personal => crate::csi!("32m"),
            EventCategory::Appointment => crate::csi!("33m"),
            EventCategory::Other => crate::csi!("37m"),
        }
    }

    pub fn paint(self, s: impl AsRef<str>) -> String {
        format!("{}{}{}", self.ansi_fg(), s.as_ref(), Self::RESET)
    }
}

/// Keys the calendar reacts to when no dialog or text input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(serialize_all = "lowercase")]
pub enum ShortcutKey {
    N,
    T,
    W,
    M,
    Left,
    Right,
}

impl ShortcutKey {
    /// Accepts browser-style names too ("ArrowLeft").
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(&s.to_key_name()).map_err(|_| {
            Error::Parse(format!(
                "Unsupported key: '{}'. Valid keys: {}",
                s.trim(),
                valid_csv::<ShortcutKey>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%m-%d-%Y")]
    MdYDash,
    #[strum(serialize = "%m-%d")]
    MdDash,
}

impl DateFormat {
    /// Input rewritten so chrono can parse it; month-day input gets the current year.
    fn prepare(self, input: &str) -> (String, DateFormat) {
        match self {
            DateFormat::MdDash => {
                let year = Local::now().date_naive().year();
                (format!("{year}-{input}"), DateFormat::YmdDash)
            }
            other => (input.to_owned(), other),
        }
    }
}

impl Date {
    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();

        for f in DateFormat::iter() {
            let (prepared, format) = f.prepare(&input);
            if let Ok(date) = NaiveDate::parse_from_str(&prepared, format.as_ref()) {
                return Ok(Date(date));
            }
        }

        Err(Error::Parse(format!(
            "Invalid date format: '{}'. {}",
            input,
            Self::usage()
        )))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Vertical pixel offset inside a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixels(pub f64);

impl Pixels {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let raw = s.trim().trim_end_matches("px");
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Pixels(v)),
            _ => Err(Error::Parse(format!(
                "Invalid pixel offset: '{}'. Expected a non-negative number.",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}
