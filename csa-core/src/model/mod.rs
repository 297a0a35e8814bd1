//! Data model for the journey planner.
//!
//! [`feed`] holds the normalised, string-keyed GTFS tables. [`compiled`]
//! holds the compact, integer-keyed form the search engine runs over.

pub mod compiled;
pub mod feed;

pub use compiled::{CompiledTimetable, CompiledTransfer, Connection, IdMaps, StopIndex, TripIndex};
pub use feed::{
    CalendarDateException, CalendarEntry, CalendarExceptionType, Feed, Route, Stop, StopTimeRow,
    Transfer,
};
