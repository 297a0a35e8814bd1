//! The compact, integer-keyed form of a timetable produced by
//! [`compile`](crate::compiler::compile). Immutable once built and freely
//! shareable across concurrent queries.

use crate::time::Time;

pub type StopIndex = usize;
pub type TripIndex = usize;

/// A single vehicle hop between two adjacent stops on one trip.
///
/// `Connection`s in a [`CompiledTimetable`] are sorted by `departure_time`
/// ascending; ties keep the stable order they were emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub departure_stop: StopIndex,
    pub arrival_stop: StopIndex,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub trip_index: TripIndex,
}

/// A footpath transfer with compact stop ids and a non-negative duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledTransfer {
    pub to_stop: StopIndex,
    pub min_transfer_time: Time,
}

/// Back-translation arrays from compact index to the original GTFS string id.
#[derive(Debug, Clone, Default)]
pub struct IdMaps {
    pub stop_ids: Vec<String>,
    pub trip_ids: Vec<String>,
}

impl IdMaps {
    pub fn stop_id(&self, index: StopIndex) -> &str {
        &self.stop_ids[index]
    }

    pub fn trip_id(&self, index: TripIndex) -> &str {
        &self.trip_ids[index]
    }
}

/// A timetable compiled for one `(day, route_filter)` pair.
#[derive(Debug, Clone)]
pub struct CompiledTimetable {
    pub connections: Vec<Connection>,
    pub num_stops: usize,
    pub num_trips: usize,
    pub ids: IdMaps,
}

impl CompiledTimetable {
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
