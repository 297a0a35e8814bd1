//! Turns a raw hop chain produced by a scan's back-pointer walk into a
//! human-readable [`Journey`].

use itertools::Itertools;

use crate::model::feed::Feed;
use crate::model::{CompiledTimetable, StopIndex, TripIndex};
use crate::time::{format_clock, Time};

use super::csa::Hop;

/// One stop visited along a [`Journey`], annotated by the leg that arrives
/// there. `route_id`/`trip_id`/`stop_id` are `None` when the leg has no
/// trip (a transfer) or the caller asked for `include_ids = false`.
/// `arrival_time`/`departure_time` serialize as zero-padded `HH:MM:SS`
/// (hours may exceed 23), matching the wire format a caller gave as input.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Leg {
    pub route_id: Option<String>,
    pub route_name: Option<String>,
    pub trip_id: Option<String>,
    pub trip_name: Option<String>,
    pub stop_id: Option<String>,
    pub stop_name: String,
    #[serde(serialize_with = "serialize_clock")]
    pub arrival_time: Time,
    #[serde(serialize_with = "serialize_optional_clock")]
    pub departure_time: Option<Time>,
}

fn serialize_clock<S>(time: &Time, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_clock(*time))
}

fn serialize_optional_clock<S>(
    time: &Option<Time>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match time {
        Some(t) => serializer.serialize_str(&format_clock(*t)),
        None => serializer.serialize_none(),
    }
}

pub type Journey = Vec<Leg>;

enum RawLeg {
    Ride {
        trip_index: TripIndex,
        board_time: Time,
        last_stop: StopIndex,
        arrival_time: Time,
    },
    Transfer {
        to_stop: StopIndex,
        arrival_time: Time,
    },
}

/// A group is keyed by the trip its Ride hops share; `None` marks a
/// transfer, which never merges with a neighbour.
fn group_key(hop: &Hop) -> Option<TripIndex> {
    match hop {
        Hop::Ride(c) => Some(c.trip_index),
        Hop::Transfer { .. } => None,
    }
}

/// Builds a [`Journey`] from the hops a scan's back-pointer walk produced.
///
/// Consecutive ride hops on the same trip collapse into a single leg
/// spanning the first boarded stop to the last alighted stop. A circular
/// route that revisits a trip can make two unrelated visits collapse into
/// one leg; this is accepted as a known quirk of grouping by trip index
/// rather than by stop contiguity.
pub fn reconstruct(
    hops: &[Hop],
    timetable: &CompiledTimetable,
    feed: &Feed,
    include_ids: bool,
) -> Journey {
    let mut sorted: Vec<Hop> = hops.to_vec();
    sorted.sort_by_key(|hop| match hop {
        Hop::Ride(c) => c.departure_time,
        Hop::Transfer { depart_time, .. } => *depart_time,
    });

    let raw_legs: Vec<RawLeg> = sorted
        .into_iter()
        .chunk_by(group_key)
        .into_iter()
        .map(|(key, group)| match key {
            Some(trip_index) => {
                let mut group = group.map(|hop| match hop {
                    Hop::Ride(c) => c,
                    Hop::Transfer { .. } => unreachable!("transfers never share a Ride's key"),
                });
                let first = group.next().expect("chunk_by never yields an empty group");
                let last = group.last().unwrap_or(first);
                RawLeg::Ride {
                    trip_index,
                    board_time: first.departure_time,
                    last_stop: last.arrival_stop,
                    arrival_time: last.arrival_time,
                }
            }
            None => {
                let hop = group.into_iter().next().expect("transfer group is never empty");
                let Hop::Transfer { to_stop, arrive_time, .. } = hop else {
                    unreachable!("key None only produced by Hop::Transfer");
                };
                RawLeg::Transfer {
                    to_stop,
                    arrival_time: arrive_time,
                }
            }
        })
        .collect();

    let mut journey: Journey = raw_legs
        .into_iter()
        .map(|raw| into_leg(raw, timetable, feed, include_ids))
        .collect();

    journey.sort_by_key(|leg| leg.departure_time.unwrap_or(leg.arrival_time));
    journey
}

fn into_leg(raw: RawLeg, timetable: &CompiledTimetable, feed: &Feed, include_ids: bool) -> Leg {
    match raw {
        RawLeg::Ride {
            trip_index,
            board_time,
            last_stop,
            arrival_time,
        } => {
            let trip_id = timetable.ids.trip_id(trip_index);
            let trip = feed.trip_by_id(trip_id);
            let route = trip.and_then(|t| feed.route_by_id(&t.route_id));
            let stop_id = timetable.ids.stop_id(last_stop);
            let stop_name = stop_name_of(feed, stop_id);
            Leg {
                route_id: include_ids.then(|| route.map(|r| r.route_id.clone())).flatten(),
                route_name: route.map(|r| r.route_short_name.clone()),
                trip_id: include_ids.then(|| trip_id.to_string()),
                trip_name: trip.and_then(|t| t.trip_headsign.clone()),
                stop_id: include_ids.then(|| stop_id.to_string()),
                stop_name,
                arrival_time,
                departure_time: Some(board_time),
            }
        }
        RawLeg::Transfer {
            to_stop,
            arrival_time,
        } => {
            let stop_id = timetable.ids.stop_id(to_stop);
            Leg {
                route_id: None,
                route_name: None,
                trip_id: None,
                trip_name: Some("(transfer)".to_string()),
                stop_id: include_ids.then(|| stop_id.to_string()),
                stop_name: stop_name_of(feed, stop_id),
                arrival_time,
                departure_time: None,
            }
        }
    }
}

fn stop_name_of(feed: &Feed, stop_id: &str) -> String {
    feed.stop_by_id(stop_id)
        .map(|s| s.stop_name.clone())
        .unwrap_or_default()
}
