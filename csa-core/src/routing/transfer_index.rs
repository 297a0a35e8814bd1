//! Per-stop footpath index: for each stop index, an ordered slice of
//! `(to_stop, min_transfer_time)` reachable on foot.

use hashbrown::HashMap;

use crate::model::{CompiledTransfer, StopIndex};

/// Compact footpath lookup over a [`CompiledTimetable`](crate::model::CompiledTimetable).
///
/// Built once alongside the timetable it indexes and immutable thereafter;
/// stops with no outgoing transfer simply have no entry.
#[derive(Debug, Clone, Default)]
pub struct TransferIndex {
    by_origin: HashMap<StopIndex, Vec<CompiledTransfer>>,
}

impl TransferIndex {
    pub(crate) fn new(by_origin: HashMap<StopIndex, Vec<CompiledTransfer>>) -> Self {
        TransferIndex { by_origin }
    }

    /// Transfers leaving `stop`, sorted by `(min_transfer_time, to_stop)`.
    /// Empty slice if `stop` has none.
    pub fn transfers_from(&self, stop: StopIndex) -> &[CompiledTransfer] {
        self.by_origin
            .get(&stop)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of stops that have at least one outgoing transfer.
    pub fn len(&self) -> usize {
        self.by_origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }
}
