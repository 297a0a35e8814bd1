//! Search: the CSA forward scan, its reverse-scan refinement, the footpath
//! index both run over, and the reconstructor that turns a hop chain into a
//! [`Journey`](reconstruct::Journey).

pub mod csa;
pub mod reconstruct;
pub mod reverse;
pub mod transfer_index;

pub use csa::{scan, walk_back, Hop, ScanOutcome};
pub use reconstruct::{reconstruct, Journey, Leg};
pub use reverse::refine;
pub use transfer_index::TransferIndex;
