//! Converts raw GTFS rows into the normalised [`Feed`](crate::model::Feed).

use std::path::Path;

use log::{info, warn};

use super::parser::{deserialize_gtfs_file, deserialize_optional_gtfs_file, parse_time};
use super::raw_types::{
    FeedCalendar, FeedCalendarDates, FeedRoute, FeedStop, FeedStopTime, FeedTransfer, FeedTrip,
};
use crate::error::Result;
use crate::model::feed::{
    CalendarDateException, CalendarEntry, CalendarExceptionType, Feed, Route, Stop, StopTimeRow,
    Transfer,
};
use geo::Point;

/// Loads the six GTFS tables from `dir` (one file per table) into a [`Feed`].
///
/// `transfers.txt` and `calendar_dates.txt` are optional; their absence
/// yields empty tables rather than an error.
pub fn load_feed(dir: &Path) -> Result<Feed> {
    let raw_stops: Vec<FeedStop> = deserialize_gtfs_file(&dir.join("stops.txt"))?;
    let raw_routes: Vec<FeedRoute> = deserialize_gtfs_file(&dir.join("routes.txt"))?;
    let raw_trips: Vec<FeedTrip> = deserialize_gtfs_file(&dir.join("trips.txt"))?;
    let raw_stop_times: Vec<FeedStopTime> = deserialize_gtfs_file(&dir.join("stop_times.txt"))?;
    let raw_calendar: Vec<FeedCalendar> = deserialize_gtfs_file(&dir.join("calendar.txt"))?;
    let raw_calendar_dates: Vec<FeedCalendarDates> =
        deserialize_optional_gtfs_file(&dir.join("calendar_dates.txt"))?;
    let raw_transfers: Vec<FeedTransfer> =
        deserialize_optional_gtfs_file(&dir.join("transfers.txt"))?;

    info!(
        "loaded raw GTFS tables: {} stops, {} routes, {} trips, {} stop_times, {} transfers",
        raw_stops.len(),
        raw_routes.len(),
        raw_trips.len(),
        raw_stop_times.len(),
        raw_transfers.len()
    );

    let stops = raw_stops.into_iter().map(convert_stop).collect();
    let routes = raw_routes
        .into_iter()
        .map(|r| Route {
            route_id: r.route_id,
            route_short_name: r.route_short_name,
            route_long_name: r.route_long_name,
        })
        .collect();
    let trips = raw_trips
        .into_iter()
        .map(|t| crate::model::feed::Trip {
            trip_id: t.trip_id,
            route_id: t.route_id,
            service_id: t.service_id,
            trip_headsign: (!t.trip_headsign.is_empty()).then_some(t.trip_headsign),
        })
        .collect();
    let stop_times = raw_stop_times
        .into_iter()
        .filter_map(convert_stop_time)
        .collect();
    let calendar = raw_calendar.into_iter().map(convert_calendar).collect();
    let calendar_dates = raw_calendar_dates
        .into_iter()
        .filter_map(convert_calendar_date)
        .collect();
    let transfers = raw_transfers.into_iter().map(convert_transfer).collect();

    Ok(Feed {
        stops,
        routes,
        trips,
        stop_times,
        transfers,
        calendar,
        calendar_dates,
    })
}

fn convert_stop(raw: FeedStop) -> Stop {
    let location = match (raw.stop_lon.parse::<f64>(), raw.stop_lat.parse::<f64>()) {
        (Ok(lon), Ok(lat)) => Some(Point::new(lon, lat)),
        _ => None,
    };
    Stop {
        stop_id: raw.stop_id,
        stop_name: raw.stop_name,
        location,
    }
}

fn convert_stop_time(raw: FeedStopTime) -> Option<StopTimeRow> {
    let stop_sequence = raw.stop_sequence.parse::<u32>().ok()?;
    Some(StopTimeRow {
        trip_id: raw.trip_id,
        stop_sequence,
        stop_id: raw.stop_id,
        arrival_time: parse_time(&raw.arrival_time),
        departure_time: parse_time(&raw.departure_time),
    })
}

fn convert_calendar(raw: FeedCalendar) -> CalendarEntry {
    // weekday_mask is indexed 0 = Sunday .. 6 = Saturday.
    let weekday_mask = [
        raw.sunday == "1",
        raw.monday == "1",
        raw.tuesday == "1",
        raw.wednesday == "1",
        raw.thursday == "1",
        raw.friday == "1",
        raw.saturday == "1",
    ];
    CalendarEntry {
        service_id: raw.service_id,
        weekday_mask,
        start_date: raw.start_date,
        end_date: raw.end_date,
    }
}

fn convert_calendar_date(raw: FeedCalendarDates) -> Option<CalendarDateException> {
    let date = raw.date?;
    let exception_type = match raw.exception_type.as_str() {
        "1" => CalendarExceptionType::Added,
        "2" => CalendarExceptionType::Removed,
        other => {
            warn!("ignoring calendar_dates.txt row with unknown exception_type '{other}'");
            return None;
        }
    };
    Some(CalendarDateException {
        service_id: raw.service_id,
        date,
        exception_type,
    })
}

fn convert_transfer(raw: FeedTransfer) -> Transfer {
    let transfer_type = raw.transfer_type.parse::<u8>().unwrap_or(0);
    let min_transfer_time = raw.min_transfer_time.parse::<u32>().ok();
    Transfer {
        from_stop_id: raw.from_stop_id,
        to_stop_id: raw.to_stop_id,
        transfer_type,
        min_transfer_time,
    }
}
