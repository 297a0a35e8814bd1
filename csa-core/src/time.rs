//! Seconds-since-midnight arithmetic and the external `HH:MM:SS` boundary.
//!
//! Internal arithmetic is always plain `u32` seconds; formatting to text is
//! applied only when a [`Journey`](crate::routing::Journey) leaves the
//! planner. Hours may exceed 23 for after-midnight services.

use crate::error::{Error, Result};

/// Seconds since service-day midnight. May exceed 86,400.
pub type Time = u32;

/// The shapes a caller may supply a time in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSpec {
    Seconds(u32),
    HourMinute(u32, u32),
    HourMinuteSecond(u32, u32, u32),
    Clock(String),
}

impl TimeSpec {
    pub fn to_seconds(&self) -> Result<Time> {
        match self {
            TimeSpec::Seconds(s) => Ok(*s),
            TimeSpec::HourMinute(h, m) => Ok(3600 * h + 60 * m),
            TimeSpec::HourMinuteSecond(h, m, s) => Ok(3600 * h + 60 * m + s),
            TimeSpec::Clock(text) => parse_clock(text).ok_or(Error::BadTime),
        }
    }
}

/// Parses `HH:MM:SS` (hours unbounded) into seconds since midnight.
///
/// Returns `None` on any shape other than exactly three `:`-separated
/// unsigned integer fields.
pub fn parse_clock(text: &str) -> Option<Time> {
    let mut parts = text.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Renders seconds-since-midnight as zero-padded `HH:MM:SS`, hours unbounded.
pub fn format_clock(time: Time) -> String {
    let hours = time / 3600;
    let minutes = (time % 3600) / 60;
    let seconds = time % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
