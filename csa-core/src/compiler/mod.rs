//! Projects a [`Feed`] onto one service day and optional route filter,
//! producing a compact [`CompiledTimetable`] plus its
//! [`TransferIndex`](crate::routing::transfer_index::TransferIndex).

mod day;
mod route_filter;

pub use day::DaySpec;
pub use route_filter::RouteFilter;

use chrono::NaiveDate;
use hashbrown::HashMap;
use log::info;

use crate::error::{Error, Result};
use crate::model::feed::CalendarExceptionType;
use crate::model::{CompiledTimetable, CompiledTransfer, Connection, Feed, IdMaps, StopIndex};
use crate::routing::transfer_index::TransferIndex;
use day::resolve_day;

/// Options the caller supplies to [`compile`].
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub day: DaySpec,
    /// A regex (optionally `!`-negated) matched against `route_short_name`.
    pub route_pattern: Option<String>,
}

/// A concrete calendar date, which additionally consults
/// `calendar_dates.txt` exceptions on top of the plain weekday resolution.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate(pub NaiveDate);

/// Compiles `feed` for the given options.
///
/// # Errors
///
/// `AmbiguousDay` / `UnknownDay` on an unresolvable day, `SillyPattern` /
/// `NoRoutesMatch` on a bad or over-restrictive route filter, and
/// `NoServicesOnDay` if the result has zero connections.
pub fn compile(feed: &Feed, options: &CompileOptions) -> Result<(CompiledTimetable, TransferIndex)> {
    let weekday = resolve_day(&options.day)?;
    let active_services = active_service_ids(feed, weekday, None);

    compile_for_services(feed, options, &active_services)
}

/// As [`compile`], but resolves the day from a concrete calendar date
/// instead of a bare weekday, applying `calendar_dates.txt` exceptions.
pub fn compile_for_date(
    feed: &Feed,
    options: &CompileOptions,
    date: CalendarDate,
) -> Result<(CompiledTimetable, TransferIndex)> {
    let weekday = date.0.format("%w").to_string().parse::<usize>().unwrap_or(0);
    let active_services = active_service_ids(feed, weekday, Some(date.0));

    compile_for_services(feed, options, &active_services)
}

fn active_service_ids(
    feed: &Feed,
    weekday: usize,
    date: Option<NaiveDate>,
) -> hashbrown::HashSet<String> {
    let mut active: hashbrown::HashSet<String> = feed
        .calendar
        .iter()
        .filter(|entry| {
            entry.weekday_mask[weekday]
                && date.is_none_or(|d| {
                    entry.start_date.is_none_or(|s| d >= s) && entry.end_date.is_none_or(|e| d <= e)
                })
        })
        .map(|entry| entry.service_id.clone())
        .collect();

    if let Some(date) = date {
        for exception in &feed.calendar_dates {
            if exception.date != date {
                continue;
            }
            match exception.exception_type {
                CalendarExceptionType::Added => {
                    active.insert(exception.service_id.clone());
                }
                CalendarExceptionType::Removed => {
                    active.remove(&exception.service_id);
                }
            }
        }
    }
    active
}

fn compile_for_services(
    feed: &Feed,
    options: &CompileOptions,
    active_services: &hashbrown::HashSet<String>,
) -> Result<(CompiledTimetable, TransferIndex)> {
    let route_filter = options
        .route_pattern
        .as_deref()
        .map(RouteFilter::parse)
        .transpose()?;

    if let Some(filter) = &route_filter {
        let any_route_matches = feed.routes.iter().any(|r| filter.matches(r));
        if !any_route_matches {
            return Err(Error::NoRoutesMatch);
        }
    }

    let surviving_trips: Vec<&crate::model::feed::Trip> = feed
        .trips
        .iter()
        .filter(|trip| active_services.contains(&trip.service_id))
        .filter(|trip| {
            route_filter.as_ref().is_none_or(|filter| {
                feed.route_by_id(&trip.route_id)
                    .is_some_and(|route| filter.matches(route))
            })
        })
        .collect();

    if surviving_trips.is_empty() {
        return Err(Error::NoServicesOnDay);
    }

    let trip_ids: Vec<String> = surviving_trips.iter().map(|t| t.trip_id.clone()).collect();
    let trip_index_of: HashMap<&str, usize> = trip_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.as_str(), idx))
        .collect();

    let mut stop_times_by_trip: HashMap<&str, Vec<&crate::model::StopTimeRow>> = HashMap::new();
    for row in &feed.stop_times {
        if let Some(&_idx) = trip_index_of.get(row.trip_id.as_str()) {
            stop_times_by_trip
                .entry(row.trip_id.as_str())
                .or_default()
                .push(row);
        }
    }
    for rows in stop_times_by_trip.values_mut() {
        rows.sort_by_key(|r| r.stop_sequence);
    }

    let mut stop_index_of: HashMap<&str, StopIndex> = HashMap::new();
    let mut stop_ids: Vec<String> = Vec::new();
    let mut connections: Vec<Connection> = Vec::new();

    for trip in &surviving_trips {
        let Some(rows) = stop_times_by_trip.get(trip.trip_id.as_str()) else {
            continue;
        };
        let trip_idx = trip_index_of[trip.trip_id.as_str()];
        for window in rows.windows(2) {
            let [from, to] = window else { continue };
            let from_idx = *stop_index_of.entry(from.stop_id.as_str()).or_insert_with(|| {
                stop_ids.push(from.stop_id.clone());
                stop_ids.len() - 1
            });
            let to_idx = *stop_index_of.entry(to.stop_id.as_str()).or_insert_with(|| {
                stop_ids.push(to.stop_id.clone());
                stop_ids.len() - 1
            });
            connections.push(Connection {
                departure_stop: from_idx,
                arrival_stop: to_idx,
                departure_time: from.departure_time,
                arrival_time: to.arrival_time,
                trip_index: trip_idx,
            });
        }
    }

    // Stable sort preserves feed order as the tie-break for equal departure times.
    connections.sort_by_key(|c| c.departure_time);

    let ids = IdMaps {
        stop_ids,
        trip_ids,
    };

    let timetable = CompiledTimetable {
        num_stops: ids.stop_ids.len(),
        num_trips: ids.trip_ids.len(),
        connections,
        ids,
    };

    let transfer_index = compile_transfers(feed, &stop_index_of);

    info!(
        "compiled timetable: {} trips, {} stops, {} connections, {} transfer origins",
        timetable.num_trips,
        timetable.num_stops,
        timetable.connections.len(),
        transfer_index.len()
    );

    Ok((timetable, transfer_index))
}

fn compile_transfers(
    feed: &Feed,
    stop_index_of: &HashMap<&str, StopIndex>,
) -> TransferIndex {
    let mut by_origin: HashMap<StopIndex, Vec<CompiledTransfer>> = HashMap::new();
    let mut discarded = 0usize;

    for transfer in &feed.transfers {
        if transfer.transfer_type != 2 {
            continue;
        }
        let (Some(&from), Some(&to)) = (
            stop_index_of.get(transfer.from_stop_id.as_str()),
            stop_index_of.get(transfer.to_stop_id.as_str()),
        ) else {
            discarded += 1;
            continue;
        };
        by_origin.entry(from).or_default().push(CompiledTransfer {
            to_stop: to,
            min_transfer_time: transfer.min_transfer_time.unwrap_or(0),
        });
    }

    if discarded > 0 {
        log::debug!("discarded {discarded} transfers referencing stops outside this timetable");
    }

    for transfers in by_origin.values_mut() {
        transfers.sort_by_key(|t| (t.min_transfer_time, t.to_stop));
    }

    TransferIndex::new(by_origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::feed::{CalendarEntry, Route, Stop, StopTimeRow, Transfer, Trip};

    fn sample_feed() -> Feed {
        Feed {
            stops: vec![
                Stop {
                    stop_id: "A".into(),
                    stop_name: "Stop A".into(),
                    location: None,
                },
                Stop {
                    stop_id: "B".into(),
                    stop_name: "Stop B".into(),
                    location: None,
                },
                Stop {
                    stop_id: "C".into(),
                    stop_name: "Stop C".into(),
                    location: None,
                },
            ],
            routes: vec![
                Route {
                    route_id: "R1".into(),
                    route_short_name: "U1".into(),
                    route_long_name: String::new(),
                },
                Route {
                    route_id: "R2".into(),
                    route_short_name: "S1".into(),
                    route_long_name: String::new(),
                },
            ],
            trips: vec![
                Trip {
                    trip_id: "T1".into(),
                    route_id: "R1".into(),
                    service_id: "WEEKDAY".into(),
                    trip_headsign: Some("To C".into()),
                },
                Trip {
                    trip_id: "T2".into(),
                    route_id: "R2".into(),
                    service_id: "WEEKDAY".into(),
                    trip_headsign: None,
                },
            ],
            stop_times: vec![
                StopTimeRow {
                    trip_id: "T1".into(),
                    stop_sequence: 1,
                    stop_id: "A".into(),
                    arrival_time: 1000,
                    departure_time: 1000,
                },
                StopTimeRow {
                    trip_id: "T1".into(),
                    stop_sequence: 2,
                    stop_id: "B".into(),
                    arrival_time: 1100,
                    departure_time: 1100,
                },
                StopTimeRow {
                    trip_id: "T1".into(),
                    stop_sequence: 3,
                    stop_id: "C".into(),
                    arrival_time: 1200,
                    departure_time: 1200,
                },
                StopTimeRow {
                    trip_id: "T2".into(),
                    stop_sequence: 1,
                    stop_id: "A".into(),
                    arrival_time: 900,
                    departure_time: 900,
                },
                StopTimeRow {
                    trip_id: "T2".into(),
                    stop_sequence: 2,
                    stop_id: "C".into(),
                    arrival_time: 950,
                    departure_time: 950,
                },
            ],
            transfers: vec![Transfer {
                from_stop_id: "B".into(),
                to_stop_id: "C".into(),
                transfer_type: 2,
                min_transfer_time: Some(60),
            }],
            calendar: vec![CalendarEntry {
                service_id: "WEEKDAY".into(),
                weekday_mask: [false, false, false, true, false, false, false],
                start_date: None,
                end_date: None,
            }],
            calendar_dates: vec![],
        }
    }

    #[test]
    fn compiles_connections_sorted_by_departure() {
        let feed = sample_feed();
        let options = CompileOptions {
            day: DaySpec::Number(4),
            route_pattern: None,
        };
        let (timetable, _) = compile(&feed, &options).unwrap();
        assert_eq!(timetable.num_trips, 2);
        assert_eq!(timetable.connections.len(), 3);
        assert!(
            timetable
                .connections
                .windows(2)
                .all(|w| w[0].departure_time <= w[1].departure_time)
        );
    }

    #[test]
    fn no_services_on_wrong_day() {
        let feed = sample_feed();
        let options = CompileOptions {
            day: DaySpec::Number(1),
            route_pattern: None,
        };
        assert!(matches!(
            compile(&feed, &options),
            Err(Error::NoServicesOnDay)
        ));
    }

    #[test]
    fn route_filter_restricts_trips() {
        let feed = sample_feed();
        let options = CompileOptions {
            day: DaySpec::Number(4),
            route_pattern: Some("^U".into()),
        };
        let (timetable, _) = compile(&feed, &options).unwrap();
        assert_eq!(timetable.num_trips, 1);
    }

    #[test]
    fn route_filter_matching_nothing_errors() {
        let feed = sample_feed();
        let options = CompileOptions {
            day: DaySpec::Number(4),
            route_pattern: Some("^X".into()),
        };
        assert!(matches!(
            compile(&feed, &options),
            Err(Error::NoRoutesMatch)
        ));
    }

    #[test]
    fn compiling_twice_is_idempotent() {
        let feed = sample_feed();
        let options = CompileOptions {
            day: DaySpec::Number(4),
            route_pattern: None,
        };
        let (first, _) = compile(&feed, &options).unwrap();
        let (second, _) = compile(&feed, &options).unwrap();
        assert_eq!(first.connections, second.connections);
        assert_eq!(first.ids.stop_ids, second.ids.stop_ids);
        assert_eq!(first.ids.trip_ids, second.ids.trip_ids);
    }

    #[test]
    fn transfer_only_compiled_for_type_2() {
        let feed = sample_feed();
        let options = CompileOptions {
            day: DaySpec::Number(4),
            route_pattern: None,
        };
        let (timetable, index) = compile(&feed, &options).unwrap();
        let b = timetable
            .ids
            .stop_ids
            .iter()
            .position(|id| id == "B")
            .unwrap();
        assert_eq!(index.transfers_from(b).len(), 1);
    }
}
