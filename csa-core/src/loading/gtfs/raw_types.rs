//! `serde` row types mirroring the GTFS text tables, one struct per file.
//! Fields keep GTFS's native string encoding; conversion to the in-memory
//! [`Feed`](crate::model::Feed) happens in [`super::feed_builder`].

use serde::Deserialize;

use super::parser::deserialize_gtfs_date;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedCalendar {
    pub service_id: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
    #[serde(deserialize_with = "deserialize_gtfs_date")]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(deserialize_with = "deserialize_gtfs_date")]
    pub end_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedCalendarDates {
    pub service_id: String,
    #[serde(deserialize_with = "deserialize_gtfs_date")]
    pub date: Option<chrono::NaiveDate>,
    pub exception_type: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedTrip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    pub trip_headsign: String,
    pub trip_short_name: String,
    pub direction_id: String,
    pub block_id: String,
    pub shape_id: String,
    pub wheelchair_accessible: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedRoute {
    pub route_id: String,
    pub agency_id: String,
    pub route_short_name: String,
    pub route_long_name: String,
    pub route_desc: String,
    pub route_type: String,
    pub route_url: String,
    pub route_color: String,
    pub route_text_color: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FeedStopTime {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedStop {
    pub stop_id: String,
    pub stop_code: String,
    pub stop_name: String,
    pub stop_desc: String,
    pub stop_lat: String,
    pub stop_lon: String,
    pub zone_id: String,
    pub stop_url: String,
    pub location_type: String,
    pub parent_station: String,
    pub stop_timezone: String,
    pub wheelchair_boarding: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedTransfer {
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub transfer_type: String,
    pub min_transfer_time: String,
}
