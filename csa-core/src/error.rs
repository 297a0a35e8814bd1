use thiserror::Error;

/// Errors surfaced by a single query. Fatal to that query, never to the process.
#[derive(Error, Debug)]
pub enum Error {
    #[error("time argument was not a scalar, (H, M), (H, M, S), or HH:MM:SS string")]
    BadTime,
    #[error("day '{0}' does not match any weekday")]
    UnknownDay(String),
    #[error("day '{0}' matches more than one weekday")]
    AmbiguousDay(String),
    #[error("route_pattern matched no routes")]
    NoRoutesMatch,
    #[error("route_pattern was the literal \"!\"")]
    SillyPattern,
    #[error("no trip's service runs on the resolved day")]
    NoServicesOnDay,
    #[error("no connections remain after the start time")]
    NoServicesAfterStart,
    #[error("no stop matches '{0}'")]
    StationNotFound(String),
    #[error("from and to have different lengths ({from} vs {to})")]
    LengthMismatch { from: usize, to: usize },
    #[error("invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed GTFS field '{field}' in {file}: {value}")]
    InvalidField {
        file: &'static str,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
