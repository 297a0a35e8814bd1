use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

pub fn deserialize_gtfs_file<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path)?;
    Ok(csv::Reader::from_reader(file)
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()?)
}

/// Like [`deserialize_gtfs_file`] but returns an empty table instead of
/// erroring when the file is absent (e.g. a feed with no `transfers.txt`).
pub fn deserialize_optional_gtfs_file<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> serde::Deserialize<'de>,
{
    if !path.exists() {
        return Ok(Vec::new());
    }
    deserialize_gtfs_file(path)
}

/// Parse `HH:MM:SS` (hours unbounded) to seconds since midnight.
///
/// A fast byte path handles the common two-digit-field case; anything else
/// falls back to a split/parse that tolerates wider fields.
pub fn parse_time(time_str: &str) -> u32 {
    let bytes = time_str.as_bytes();
    if bytes.len() == 8 && bytes[2] == b':' && bytes[5] == b':' {
        if let (Some(h1), Some(h2), Some(m1), Some(m2), Some(s1), Some(s2)) = (
            digit(bytes[0]),
            digit(bytes[1]),
            digit(bytes[3]),
            digit(bytes[4]),
            digit(bytes[6]),
            digit(bytes[7]),
        ) {
            return (h1 * 10 + h2) * 3600 + (m1 * 10 + m2) * 60 + (s1 * 10 + s2);
        }
    }
    parse_time_fallback(time_str)
}

fn digit(b: u8) -> Option<u32> {
    b.is_ascii_digit().then(|| u32::from(b - b'0'))
}

fn parse_time_fallback(time_str: &str) -> u32 {
    let mut parts = time_str.split(':');
    let hours = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minutes = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let seconds = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    hours * 3600 + minutes * 60 + seconds
}

pub(super) fn deserialize_gtfs_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<chrono::NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let date_str = String::deserialize(deserializer)?;
    if date_str.is_empty() {
        Ok(None)
    } else {
        chrono::NaiveDate::parse_from_str(&date_str, "%Y%m%d")
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
