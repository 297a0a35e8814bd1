//! In-memory, normalised representation of the GTFS tables the planner uses.
//!
//! A `Feed` is immutable once built. It still keys everything by the
//! opaque GTFS string ids; [`compile`](crate::compiler::compile) is what
//! projects a `Feed` onto compact integer indices for a given day.

use chrono::NaiveDate;
use geo::Point;

use crate::time::Time;

pub type StopId = String;
pub type RouteIdString = String;
pub type TripId = String;
pub type ServiceId = String;

#[derive(Debug, Clone)]
pub struct Stop {
    pub stop_id: StopId,
    pub stop_name: String,
    /// `(lon, lat)` in WGS84 degrees, when the feed supplied coordinates.
    pub location: Option<Point<f64>>,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub route_id: RouteIdString,
    pub route_short_name: String,
    pub route_long_name: String,
}

#[derive(Debug, Clone)]
pub struct Trip {
    pub trip_id: TripId,
    pub route_id: RouteIdString,
    pub service_id: ServiceId,
    pub trip_headsign: Option<String>,
}

/// Owned stop-time row, as stored on a [`Feed`].
#[derive(Debug, Clone)]
pub struct StopTimeRow {
    pub trip_id: TripId,
    pub stop_sequence: u32,
    pub stop_id: StopId,
    pub arrival_time: Time,
    pub departure_time: Time,
}

/// Only `transfer_type == 2` rows survive compilation; type 0/1/3
/// rows are kept here and discarded by the compiler, matching real feeds
/// that mix transfer types in one table.
#[derive(Debug, Clone)]
pub struct Transfer {
    pub from_stop_id: StopId,
    pub to_stop_id: StopId,
    pub transfer_type: u8,
    pub min_transfer_time: Option<Time>,
}

/// weekday 0 = Sunday .. 6 = Saturday; the public day selector instead uses
/// 1..7 where 1 = Sunday, resolved down to this index by the compiler.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    pub service_id: ServiceId,
    pub weekday_mask: [bool; 7],
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// `calendar_dates.txt` exception: adds or removes a service on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarExceptionType {
    Added,
    Removed,
}

#[derive(Debug, Clone)]
pub struct CalendarDateException {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub exception_type: CalendarExceptionType,
}

/// Immutable, normalised feed. Produced once by [`crate::loading`] and
/// shared by every subsequent compile/query.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTimeRow>,
    pub transfers: Vec<Transfer>,
    pub calendar: Vec<CalendarEntry>,
    pub calendar_dates: Vec<CalendarDateException>,
}

impl Feed {
    pub fn stop_by_id(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.stop_id == stop_id)
    }

    pub fn route_by_id(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.route_id == route_id)
    }

    pub fn trip_by_id(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.trip_id == trip_id)
    }
}
