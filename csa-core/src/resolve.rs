//! Name resolver: collapses a free-text name, a GTFS `stop_id`, or a
//! `(lon, lat)` pair into one or more stop ids in a [`Feed`].

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::feed::{Feed, Stop, StopId};

const EARTH_RADIUS_METRES: f64 = 6_371_000.0;
const WARN_SPREAD_METRES: f64 = 5_000.0;

/// The shapes a caller may supply `from`/`to` in.
#[derive(Debug, Clone)]
pub enum StopQuery {
    /// A literal GTFS `stop_id`.
    Id(String),
    /// Free text matched against `stop_name`.
    Name(String),
    /// `(longitude, latitude)` in WGS84 degrees.
    Coordinates(f64, f64),
}

/// Resolves `query` against `feed`, returning the matching stop ids.
///
/// `grep_fixed` selects literal (`==`) matching over regex matching for
/// [`StopQuery::Name`]; it has no effect on the other variants.
pub fn resolve(feed: &Feed, query: &StopQuery, grep_fixed: bool) -> Result<Vec<StopId>> {
    match query {
        StopQuery::Id(id) => {
            if feed.stop_by_id(id).is_some() {
                Ok(vec![id.clone()])
            } else {
                Err(Error::StationNotFound(id.clone()))
            }
        }
        StopQuery::Name(text) => resolve_by_name(feed, text, grep_fixed),
        StopQuery::Coordinates(lon, lat) => resolve_by_coordinates(feed, *lon, *lat),
    }
}

fn resolve_by_name(feed: &Feed, text: &str, grep_fixed: bool) -> Result<Vec<StopId>> {
    let matches: Vec<&Stop> = if grep_fixed {
        feed.stops.iter().filter(|s| s.stop_name == text).collect()
    } else {
        let pattern = Regex::new(text)?;
        feed.stops
            .iter()
            .filter(|s| pattern.is_match(&s.stop_name))
            .collect()
    };

    if matches.is_empty() {
        return Err(Error::StationNotFound(text.to_string()));
    }

    warn_if_spread_out(&matches);
    Ok(matches.iter().map(|s| s.stop_id.clone()).collect())
}

fn resolve_by_coordinates(feed: &Feed, lon: f64, lat: f64) -> Result<Vec<StopId>> {
    let nearest = feed
        .stops
        .iter()
        .filter_map(|s| s.location.map(|p| (s, haversine_metres(lat, lon, p.y(), p.x()))))
        .min_by(|(_, a), (_, b)| a.total_cmp(b));

    let Some((nearest, _)) = nearest else {
        return Err(Error::StationNotFound(format!("({lon}, {lat})")));
    };

    let matches: Vec<&Stop> = feed
        .stops
        .iter()
        .filter(|s| s.stop_name == nearest.stop_name)
        .collect();

    warn_if_spread_out(&matches);
    Ok(matches.iter().map(|s| s.stop_id.clone()).collect())
}

fn warn_if_spread_out(matches: &[&Stop]) {
    let points: Vec<geo::Point<f64>> = matches.iter().filter_map(|s| s.location).collect();
    if points.len() < 2 {
        return;
    }
    let mut max_spread = 0.0f64;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = haversine_metres(points[i].y(), points[i].x(), points[j].y(), points[j].x());
            max_spread = max_spread.max(d);
        }
    }
    if max_spread > WARN_SPREAD_METRES {
        log::warn!(
            "name match spans {:.1} km across {} stops",
            max_spread / 1000.0,
            matches.len()
        );
    }
}

fn haversine_metres(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METRES * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    fn feed_with_stops() -> Feed {
        Feed {
            stops: vec![
                Stop {
                    stop_id: "A1".into(),
                    stop_name: "Alexanderplatz".into(),
                    location: Some(Point::new(13.4132, 52.5219)),
                },
                Stop {
                    stop_id: "A2".into(),
                    stop_name: "Alexanderplatz".into(),
                    location: Some(Point::new(13.4135, 52.5221)),
                },
                Stop {
                    stop_id: "B1".into(),
                    stop_name: "Schonlein".into(),
                    location: Some(Point::new(13.4222, 52.4931)),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn resolves_by_exact_id() {
        let feed = feed_with_stops();
        let ids = resolve(&feed, &StopQuery::Id("B1".into()), false).unwrap();
        assert_eq!(ids, vec!["B1".to_string()]);
    }

    #[test]
    fn unknown_id_is_station_not_found() {
        let feed = feed_with_stops();
        assert!(matches!(
            resolve(&feed, &StopQuery::Id("ZZZ".into()), false),
            Err(Error::StationNotFound(_))
        ));
    }

    #[test]
    fn name_match_returns_every_platform() {
        let feed = feed_with_stops();
        let mut ids = resolve(&feed, &StopQuery::Name("Alexanderplatz".into()), true).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["A1".to_string(), "A2".to_string()]);
    }

    #[test]
    fn regex_name_match() {
        let feed = feed_with_stops();
        let ids = resolve(&feed, &StopQuery::Name("^Schon".into()), false).unwrap();
        assert_eq!(ids, vec!["B1".to_string()]);
    }

    #[test]
    fn coordinates_resolve_to_nearest_stop_group() {
        let feed = feed_with_stops();
        let mut ids = resolve(&feed, &StopQuery::Coordinates(13.4132, 52.5219), false).unwrap();
        ids.sort();
        assert_eq!(ids, vec!["A1".to_string(), "A2".to_string()]);
    }

    #[test]
    fn no_name_match_is_station_not_found() {
        let feed = feed_with_stops();
        assert!(matches!(
            resolve(&feed, &StopQuery::Name("Nonexistent".into()), true),
            Err(Error::StationNotFound(_))
        ));
    }
}
