//! Reading a GTFS feed from disk into the in-memory [`Feed`](crate::model::Feed).

mod builder;
pub mod gtfs;

pub use builder::load_feed_from_dir;
