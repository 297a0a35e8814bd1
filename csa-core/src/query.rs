//! Top-level query surface: ties the compiler, search engine, refiner and
//! reconstructor together behind one configuration struct.

use chrono::NaiveDate;
use hashbrown::HashMap;

use crate::compiler::{compile, compile_for_date, CalendarDate, CompileOptions, DaySpec};
use crate::error::{Error, Result};
use crate::model::feed::Feed;
use crate::model::{CompiledTimetable, StopIndex};
use crate::resolve::{resolve, StopQuery};
use crate::routing::{reconstruct, refine, scan, walk_back, Journey, TransferIndex};
use crate::time::Time;

/// Configuration for one or more queries against the same compiled day.
/// `day` and `start_time` have no sensible default and must be supplied;
/// the rest mirror the documented defaults.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    pub day: DaySpec,
    /// A concrete calendar date, when set, takes the compiler down the
    /// `calendar_dates.txt`-aware path instead of the bare weekday in `day`.
    pub date: Option<NaiveDate>,
    pub route_pattern: Option<String>,
    pub start_time: Time,
    pub earliest_arrival: bool,
    pub include_ids: bool,
    pub max_transfers: Option<u32>,
    pub grep_fixed: bool,
}

impl PlannerOptions {
    pub fn new(day: DaySpec, start_time: Time) -> Self {
        PlannerOptions {
            day,
            date: None,
            route_pattern: None,
            start_time,
            earliest_arrival: true,
            include_ids: false,
            max_transfers: None,
            grep_fixed: false,
        }
    }
}

/// A feed paired with a compiled timetable for one `(day, route_pattern)`.
/// Built once per query batch; every individual `from`/`to` pair in the
/// batch reuses it with its own scratch scan state.
pub struct Planner<'f> {
    feed: &'f Feed,
    timetable: CompiledTimetable,
    transfers: TransferIndex,
    stop_index_of: HashMap<String, StopIndex>,
}

impl<'f> Planner<'f> {
    /// Compiles `feed` for `options.day` / `options.route_pattern`.
    ///
    /// # Errors
    ///
    /// Propagates the compiler's errors (`NoServicesOnDay`, `AmbiguousDay`,
    /// `UnknownDay`, `NoRoutesMatch`, `SillyPattern`), plus
    /// `NoServicesAfterStart` if no connection departs at or after
    /// `options.start_time`.
    pub fn compile(feed: &'f Feed, options: &PlannerOptions) -> Result<Self> {
        let compile_options = CompileOptions {
            day: options.day.clone(),
            route_pattern: options.route_pattern.clone(),
        };
        let (timetable, transfers) = match options.date {
            Some(date) => compile_for_date(feed, &compile_options, CalendarDate(date))?,
            None => compile(feed, &compile_options)?,
        };

        let after_start = timetable
            .connections
            .partition_point(|c| c.departure_time < options.start_time)
            < timetable.connections.len();
        if !after_start {
            return Err(Error::NoServicesAfterStart);
        }

        let stop_index_of = timetable
            .ids
            .stop_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        Ok(Planner {
            feed,
            timetable,
            transfers,
            stop_index_of,
        })
    }

    /// Resolves `query` to the compact stop indices of this compiled day.
    fn resolve_stops(&self, query: &StopQuery, grep_fixed: bool) -> Result<Vec<StopIndex>> {
        let stop_ids = resolve(self.feed, query, grep_fixed)?;
        let mut indices = Vec::with_capacity(stop_ids.len());
        for id in &stop_ids {
            match self.stop_index_of.get(id) {
                Some(&idx) => indices.push(idx),
                None => return Err(Error::StationNotFound(id.clone())),
            }
        }
        Ok(indices)
    }

    /// Runs one `from -> to` query.
    pub fn query(
        &self,
        from: &StopQuery,
        to: &StopQuery,
        options: &PlannerOptions,
    ) -> Result<Option<Journey>> {
        let starts = self.resolve_stops(from, options.grep_fixed)?;
        let ends = self.resolve_stops(to, options.grep_fixed)?;
        self.query_resolved(&starts, &ends, options)
    }

    fn query_resolved(
        &self,
        starts: &[StopIndex],
        ends: &[StopIndex],
        options: &PlannerOptions,
    ) -> Result<Option<Journey>> {
        let outcome = scan(
            &self.timetable,
            &self.transfers,
            starts,
            ends,
            options.start_time,
            options.max_transfers,
        );
        let Some((best_stop, arrival_time)) = outcome.best(ends) else {
            return Ok(None);
        };

        let mut hops = walk_back(&outcome, starts, best_stop);
        if options.earliest_arrival {
            if let Some(refined) = refine(
                &self.timetable,
                &self.transfers,
                starts,
                ends,
                arrival_time,
                options.max_transfers,
            ) {
                hops = refined;
            }
        }

        Ok(Some(reconstruct(
            &hops,
            &self.timetable,
            self.feed,
            options.include_ids,
        )))
    }

    /// Runs a batch of independent queries sharing one compiled day.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if `from.len() != to.len()`.
    pub fn query_many(
        &self,
        from: &[StopQuery],
        to: &[StopQuery],
        options: &PlannerOptions,
    ) -> Result<Vec<Option<Journey>>> {
        if from.len() != to.len() {
            return Err(Error::LengthMismatch {
                from: from.len(),
                to: to.len(),
            });
        }
        from.iter()
            .zip(to.iter())
            .map(|(f, t)| self.query(f, t, options))
            .collect()
    }
}
