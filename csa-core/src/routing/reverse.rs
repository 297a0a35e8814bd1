//! Reverse-scan refinement: tightens departure time for a fixed arrival time
//! by scanning a time-reversed view of the timetable.

use crate::model::{CompiledTimetable, Connection, StopIndex};
use crate::time::Time;

use super::csa::{self, Hop, ScanOutcome};
use super::transfer_index::TransferIndex;

/// Builds the time-reversed timetable for a forward arrival time `arrival`:
/// departure/arrival roles swap, every timestamp `t` maps to `arrival - t`,
/// and connections landing before time zero are dropped.
pub fn reverse_timetable(timetable: &CompiledTimetable, arrival: Time) -> CompiledTimetable {
    let a = i64::from(arrival);
    let mut connections: Vec<Connection> = timetable
        .connections
        .iter()
        .filter_map(|c| {
            let new_departure = a - i64::from(c.arrival_time);
            if new_departure < 0 {
                return None;
            }
            let new_arrival = a - i64::from(c.departure_time);
            Some(Connection {
                departure_stop: c.arrival_stop,
                arrival_stop: c.departure_stop,
                departure_time: new_departure as Time,
                arrival_time: new_arrival as Time,
                trip_index: c.trip_index,
            })
        })
        .collect();
    connections.sort_by_key(|c| c.departure_time);

    CompiledTimetable {
        connections,
        num_stops: timetable.num_stops,
        num_trips: timetable.num_trips,
        ids: timetable.ids.clone(),
    }
}

/// Inverts one reversed-domain hop back into real stop/time terms.
fn unmap_hop(hop: Hop, arrival: Time) -> Hop {
    let a = i64::from(arrival);
    match hop {
        Hop::Ride(c) => Hop::Ride(Connection {
            departure_stop: c.arrival_stop,
            arrival_stop: c.departure_stop,
            departure_time: (a - i64::from(c.arrival_time)) as Time,
            arrival_time: (a - i64::from(c.departure_time)) as Time,
            trip_index: c.trip_index,
        }),
        Hop::Transfer {
            from_stop,
            to_stop,
            depart_time,
            arrive_time,
        } => Hop::Transfer {
            from_stop: to_stop,
            to_stop: from_stop,
            depart_time: (a - i64::from(arrive_time)) as Time,
            arrive_time: (a - i64::from(depart_time)) as Time,
        },
    }
}

/// Runs the reverse scan for an already-found forward arrival `arrival_time`
/// at the destination. Returns the real-domain hops of the refined path, or
/// `None` if the reversed scan finds nothing (in which case the caller keeps
/// the forward result).
pub fn refine(
    timetable: &CompiledTimetable,
    transfers: &TransferIndex,
    starts: &[StopIndex],
    ends: &[StopIndex],
    arrival_time: Time,
    max_transfers: Option<u32>,
) -> Option<Vec<Hop>> {
    let reversed = reverse_timetable(timetable, arrival_time);
    if reversed.is_empty() {
        return None;
    }

    let outcome: ScanOutcome = csa::scan(&reversed, transfers, ends, starts, 0, max_transfers);
    let (best_stop, _) = outcome.best(starts)?;

    let hops = csa::walk_back(&outcome, ends, best_stop);
    if hops.is_empty() {
        return None;
    }
    Some(
        hops.into_iter()
            .map(|hop| unmap_hop(hop, arrival_time))
            .collect(),
    )
}
