//! The earliest-arrival connection scan: a single linear pass over
//! time-sorted connections.

use fixedbitset::FixedBitSet;
use hashbrown::HashSet;

use crate::model::{CompiledTimetable, Connection, StopIndex, TripIndex};
use crate::time::Time;

use super::transfer_index::TransferIndex;

/// A step on the best-known path into some stop: either a ride on a trip, or
/// a synthetic footpath hop out of [`TransferIndex`].
#[derive(Debug, Clone, Copy)]
pub enum Hop {
    Ride(Connection),
    Transfer {
        from_stop: StopIndex,
        to_stop: StopIndex,
        depart_time: Time,
        arrive_time: Time,
    },
}

impl Hop {
    fn origin_stop(&self) -> StopIndex {
        match self {
            Hop::Ride(c) => c.departure_stop,
            Hop::Transfer { from_stop, .. } => *from_stop,
        }
    }
}

/// The scratch state of one scan. Owned per query and never shared.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub tau: Vec<Time>,
    pub back: Vec<Option<Hop>>,
    pub n_transfers: Vec<u32>,
}

impl ScanOutcome {
    /// Best end stop and its arrival time, or `None` if every end stop is
    /// unreached.
    pub fn best(&self, ends: &[StopIndex]) -> Option<(StopIndex, Time)> {
        ends
            .iter()
            .copied()
            .map(|e| (e, self.tau[e]))
            .filter(|&(_, t)| t < Time::MAX)
            .min_by_key(|&(_, t)| t)
    }
}

/// Runs the forward connection scan.
///
/// `starts` members are free (zero-cost) origins at `start_time`; the scan
/// stops early once no remaining connection can improve arrival at any of
/// `ends` (the `t_best` pruning rule).
pub fn scan(
    timetable: &CompiledTimetable,
    transfers: &TransferIndex,
    starts: &[StopIndex],
    ends: &[StopIndex],
    start_time: Time,
    max_transfers: Option<u32>,
) -> ScanOutcome {
    let mut tau = vec![Time::MAX; timetable.num_stops];
    let mut back: Vec<Option<Hop>> = vec![None; timetable.num_stops];
    let mut n_transfers = vec![0u32; timetable.num_stops];
    let mut trip_reachable = FixedBitSet::with_capacity(timetable.num_trips);
    let start_set: HashSet<StopIndex> = starts.iter().copied().collect();
    let cap = max_transfers.unwrap_or(u32::MAX);

    for &s in starts {
        tau[s] = start_time;
        n_transfers[s] = 0;
    }

    let scan_from = timetable
        .connections
        .partition_point(|c| c.departure_time < start_time);

    for c in &timetable.connections[scan_from..] {
        let t_best = ends
            .iter()
            .map(|&e| tau[e])
            .min()
            .unwrap_or(Time::MAX);
        if c.departure_time > t_best {
            break;
        }

        let already_reachable = trip_reachable.contains(c.trip_index);
        let boardable = already_reachable || tau[c.departure_stop] <= c.departure_time;
        if !boardable {
            continue;
        }

        if tau[c.arrival_stop] <= c.arrival_time {
            continue;
        }

        // A freshly boarded trip costs one transfer unless boarded straight
        // off a start stop; continuing an already-reachable trip is free.
        let delta = u32::from(!already_reachable && !start_set.contains(&c.departure_stop));
        let candidate_transfers = n_transfers[c.departure_stop].saturating_add(delta);
        if candidate_transfers > cap {
            continue;
        }

        tau[c.arrival_stop] = c.arrival_time;
        n_transfers[c.arrival_stop] = candidate_transfers;
        back[c.arrival_stop] = Some(Hop::Ride(*c));
        trip_reachable.insert(c.trip_index);

        for transfer in transfers.transfers_from(c.arrival_stop) {
            let via = c.arrival_time.saturating_add(transfer.min_transfer_time);
            if via < tau[transfer.to_stop] {
                tau[transfer.to_stop] = via;
                n_transfers[transfer.to_stop] = n_transfers[c.arrival_stop];
                back[transfer.to_stop] = Some(Hop::Transfer {
                    from_stop: c.arrival_stop,
                    to_stop: transfer.to_stop,
                    depart_time: c.arrival_time,
                    arrive_time: via,
                });
            }
        }
    }

    ScanOutcome {
        tau,
        back,
        n_transfers,
    }
}

/// Walks `back` from `end` towards a member of `starts`, returning the hops
/// in chronological (source-to-destination) order.
pub fn walk_back(outcome: &ScanOutcome, starts: &[StopIndex], end: StopIndex) -> Vec<Hop> {
    let start_set: HashSet<StopIndex> = starts.iter().copied().collect();
    let mut hops = Vec::new();
    let mut current = end;
    while !start_set.contains(&current) {
        let Some(hop) = outcome.back[current] else {
            break;
        };
        current = hop.origin_stop();
        hops.push(hop);
    }
    hops.reverse();
    hops
}

#[cfg(test)]
pub(crate) fn trip_index_of(outcome: &ScanOutcome, stop: StopIndex) -> Option<TripIndex> {
    match outcome.back[stop] {
        Some(Hop::Ride(c)) => Some(c.trip_index),
        _ => None,
    }
}
