//! Reading the six GTFS tables the planner uses into a [`Feed`](crate::model::Feed).

mod feed_builder;
mod parser;
mod raw_types;

pub use feed_builder::load_feed;
pub use parser::parse_time;
