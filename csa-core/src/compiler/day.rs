//! Resolves a user-supplied day (integer or weekday prefix) to a weekday
//! index, 0 = Sunday .. 6 = Saturday.

use crate::error::{Error, Result};

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// The day a timetable is compiled for, as the caller supplied it.
#[derive(Debug, Clone)]
pub enum DaySpec {
    /// 1..7, 1 = Sunday.
    Number(u8),
    /// A case-insensitive prefix of a weekday name.
    Name(String),
}

/// Resolves a [`DaySpec`] to a weekday index (0 = Sunday .. 6 = Saturday).
///
/// A prefix must match exactly one weekday name; `"t"` matches both
/// `"tuesday"` and `"thursday"` and is rejected as [`Error::AmbiguousDay`].
pub fn resolve_day(spec: &DaySpec) -> Result<usize> {
    match spec {
        DaySpec::Number(n) => {
            if (1..=7).contains(n) {
                Ok(usize::from(n - 1))
            } else {
                Err(Error::UnknownDay(n.to_string()))
            }
        }
        DaySpec::Name(text) => resolve_day_prefix(text),
    }
}

fn resolve_day_prefix(text: &str) -> Result<usize> {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return Err(Error::UnknownDay(text.to_string()));
    }
    let matches: Vec<usize> = WEEKDAYS
        .iter()
        .enumerate()
        .filter(|(_, name)| name.starts_with(&needle))
        .map(|(idx, _)| idx)
        .collect();
    match matches.as_slice() {
        [] => Err(Error::UnknownDay(text.to_string())),
        [single] => Ok(*single),
        _ => Err(Error::AmbiguousDay(text.to_string())),
    }
}
