//! Point-to-point journey planning over a GTFS schedule via the Connection
//! Scan Algorithm.
//!
//! [`loading`] reads a GTFS directory into a [`model::Feed`]. [`compiler`]
//! projects that feed onto one service day and optional route filter into a
//! [`model::CompiledTimetable`]. [`routing`] runs the forward scan, its
//! reverse-scan refinement, and the journey reconstructor over the result.
//! [`query::Planner`] ties the three stages together behind a single
//! configuration surface, [`query::PlannerOptions`].

pub mod compiler;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod query;
pub mod resolve;
pub mod routing;
pub mod time;

pub use error::{Error, Result};
pub use query::{Planner, PlannerOptions};
pub use resolve::StopQuery;
pub use routing::{Journey, Leg};
