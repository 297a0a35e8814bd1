use std::path::Path;

use log::info;

use super::gtfs::load_feed;
use crate::error::Result;
use crate::model::Feed;

/// Loads a GTFS directory into a [`Feed`].
///
/// # Errors
///
/// Returns an error if any required table is missing or malformed.
pub fn load_feed_from_dir(gtfs_dir: &Path) -> Result<Feed> {
    info!("loading GTFS feed from {}", gtfs_dir.display());
    let feed = load_feed(gtfs_dir)?;
    info!(
        "feed loaded: {} stops, {} routes, {} trips, {} stop_times",
        feed.stops.len(),
        feed.routes.len(),
        feed.trips.len(),
        feed.stop_times.len()
    );
    Ok(feed)
}
