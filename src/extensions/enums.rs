use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::errors::{Error, Result};

trait EnumValidCsv: IntoEnumIterator + AsRef<str> + Sized {
    fn valid_csv() -> String {
        Self::iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
impl<T> EnumValidCsv for T where T: IntoEnumIterator + AsRef<str> + Sized {}

pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str> + Sized,
{
    <T as EnumValidCsv>::valid_csv()
}

/// Parse a strum enum, reporting the valid names on failure.
/// `what` is the human name used in the message ("view mode", "category").
pub fn parse_named<T>(s: &str, what: &str) -> Result<T>
where
    T: FromStr + IntoEnumIterator + AsRef<str>,
{
    T::from_str(s.trim()).map_err(|_| {
        Error::Parse(format!(
            "Invalid {what}: '{}'. Valid values: {}",
            s.trim(),
            valid_csv::<T>()
        ))
    })
}
