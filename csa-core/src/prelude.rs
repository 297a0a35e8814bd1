//! Convenience re-export of the crate's public query surface.

pub use crate::compiler::{CompileOptions, DaySpec};
pub use crate::error::{Error, Result};
pub use crate::loading::load_feed_from_dir;
pub use crate::model::feed::Feed;
pub use crate::model::{CompiledTimetable, StopIndex, TripIndex};
pub use crate::query::{Planner, PlannerOptions};
pub use crate::resolve::StopQuery;
pub use crate::routing::{Journey, Leg};
pub use crate::time::{Time, TimeSpec};
