use std::path::PathBuf;

use chrono::NaiveDate;

use csa_core::compiler::DaySpec;
use csa_core::loading::load_feed_from_dir;
use csa_core::model::feed::Feed;
use csa_core::query::{Planner, PlannerOptions};
use csa_core::resolve::StopQuery;
use csa_core::routing::Journey;
use csa_core::Error;

fn fixture_feed() -> Feed {
    let dir: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", "mini"]
        .iter()
        .collect();
    load_feed_from_dir(&dir).expect("mini fixture loads")
}

fn stop(name: &str) -> StopQuery {
    StopQuery::Name(name.to_string())
}

fn wednesday_options(start_time: u32) -> PlannerOptions {
    PlannerOptions::new(DaySpec::Number(4), start_time)
}

fn assert_monotone(journey: &Journey) {
    for pair in journey.windows(2) {
        let [prev, next] = pair else { unreachable!() };
        assert!(prev.arrival_time <= next.arrival_time);
        if let (Some(prev_dep), Some(next_dep)) = (prev.departure_time, next.departure_time) {
            assert!(prev_dep <= next_dep);
        }
        if let Some(next_dep) = next.departure_time {
            assert!(next_dep >= prev.arrival_time);
        }
    }
}

#[test]
fn finds_a_journey_crossing_a_footpath_transfer() {
    let feed = fixture_feed();
    let options = wednesday_options(8 * 3600);
    let planner = Planner::compile(&feed, &options).unwrap();

    let journey = planner
        .query(&stop("Alpha"), &stop("Delta"), &options)
        .unwrap()
        .expect("a journey from Alpha to Delta should exist");

    assert_monotone(&journey);
    assert!(journey.first().unwrap().departure_time.unwrap() >= options.start_time);
    assert_eq!(journey.last().unwrap().stop_name, "Delta");
    // Ride on T1, a standalone transfer leg, then the ride on T3.
    assert_eq!(journey.len(), 3);
    assert_eq!(journey[1].trip_name.as_deref(), Some("(transfer)"));
}

#[test]
fn route_id_matches_the_trip_it_came_from() {
    let feed = fixture_feed();
    let mut options = wednesday_options(8 * 3600);
    options.include_ids = true;
    let planner = Planner::compile(&feed, &options).unwrap();

    let journey = planner
        .query(&stop("Alpha"), &stop("Delta"), &options)
        .unwrap()
        .unwrap();

    for leg in &journey {
        let Some(route_id) = &leg.route_id else { continue };
        let Some(trip_id) = &leg.trip_id else { continue };
        let trip = feed.trip_by_id(trip_id).expect("trip exists in feed");
        assert_eq!(&trip.route_id, route_id);
    }
}

#[test]
fn max_transfers_at_the_minimum_matches_unbounded() {
    let feed = fixture_feed();
    let options = wednesday_options(8 * 3600);
    let planner = Planner::compile(&feed, &options).unwrap();

    let unbounded = planner
        .query(&stop("Alpha"), &stop("Delta"), &options)
        .unwrap()
        .unwrap();

    let mut capped = options.clone();
    capped.max_transfers = Some(1);
    let bounded = planner
        .query(&stop("Alpha"), &stop("Delta"), &capped)
        .unwrap()
        .unwrap();

    assert_eq!(unbounded, bounded);
}

#[test]
fn zero_transfers_cannot_reach_a_destination_needing_one() {
    let feed = fixture_feed();
    let mut options = wednesday_options(8 * 3600);
    options.max_transfers = Some(0);
    let planner = Planner::compile(&feed, &options).unwrap();

    let journey = planner.query(&stop("Alpha"), &stop("Delta"), &options).unwrap();
    assert!(journey.is_none());
}

#[test]
fn earliest_arrival_refines_to_a_later_departure_for_the_same_arrival() {
    let feed = fixture_feed();

    let mut direct = wednesday_options(8 * 3600);
    direct.earliest_arrival = false;
    let planner = Planner::compile(&feed, &direct).unwrap();
    let without_refine = planner.query(&stop("Alpha"), &stop("Echo"), &direct).unwrap().unwrap();

    let mut refined_options = direct.clone();
    refined_options.earliest_arrival = true;
    let with_refine = planner
        .query(&stop("Alpha"), &stop("Echo"), &refined_options)
        .unwrap()
        .unwrap();

    let arrival_without = without_refine.last().unwrap().arrival_time;
    let arrival_with = with_refine.last().unwrap().arrival_time;
    assert_eq!(arrival_without, arrival_with);

    let departure_without = without_refine.first().unwrap().departure_time.unwrap();
    let departure_with = with_refine.first().unwrap().departure_time.unwrap();
    assert!(departure_without <= departure_with);
}

#[test]
fn compiling_the_same_options_twice_is_idempotent() {
    let feed = fixture_feed();
    let options = wednesday_options(8 * 3600);

    let first = Planner::compile(&feed, &options).unwrap();
    let second = Planner::compile(&feed, &options).unwrap();

    let a = first.query(&stop("Alpha"), &stop("Delta"), &options).unwrap();
    let b = second.query(&stop("Alpha"), &stop("Delta"), &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn querying_before_any_connection_departs_is_an_error() {
    let feed = fixture_feed();
    let options = wednesday_options(23 * 3600);

    assert!(matches!(
        Planner::compile(&feed, &options),
        Err(Error::NoServicesAfterStart)
    ));
}

#[test]
fn route_pattern_excluding_every_trip_is_an_error() {
    let feed = fixture_feed();
    let mut options = wednesday_options(8 * 3600);
    options.route_pattern = Some("^no-such-route".into());

    assert!(matches!(Planner::compile(&feed, &options), Err(Error::NoRoutesMatch)));
}

#[test]
fn route_pattern_restricting_to_another_line_hides_the_stop() {
    let feed = fixture_feed();
    let mut options = wednesday_options(8 * 3600);
    options.route_pattern = Some("^2$".into());
    let planner = Planner::compile(&feed, &options).unwrap();

    let result = planner.query(&stop("Alpha"), &stop("Delta"), &options);
    assert!(matches!(result, Err(Error::StationNotFound(_))));
}

#[test]
fn the_literal_bang_pattern_is_rejected() {
    let feed = fixture_feed();
    let mut options = wednesday_options(8 * 3600);
    options.route_pattern = Some("!".into());

    assert!(matches!(Planner::compile(&feed, &options), Err(Error::SillyPattern)));
}

#[test]
fn multi_query_batch_preserves_length_and_position() {
    let feed = fixture_feed();
    let options = wednesday_options(8 * 3600);
    let planner = Planner::compile(&feed, &options).unwrap();

    let from = vec![stop("Alpha"), stop("Alpha")];
    let to = vec![stop("Delta"), stop("Nowhere")];

    let result = planner.query_many(&from, &to, &options);
    // "Nowhere" resolves to a StationNotFound error, which propagates for
    // the whole batch rather than degrading silently to a null entry.
    assert!(matches!(result, Err(Error::StationNotFound(_))));

    let to_valid = vec![stop("Delta"), stop("Echo")];
    let results = planner.query_many(&from, &to_valid, &options).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_some());
    assert!(results[1].is_some());
}

#[test]
fn a_service_absent_from_calendar_activates_through_a_calendar_dates_addition() {
    let feed = fixture_feed();
    let mut options = wednesday_options(9 * 3600);
    options.date = Some(NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
    let planner = Planner::compile(&feed, &options).unwrap();

    let journey = planner
        .query(&stop("Alpha"), &stop("Charlie"), &options)
        .unwrap()
        .expect("the SPECIAL service's trip should be active on 2024-01-17");
    assert_eq!(journey.last().unwrap().stop_name, "Charlie");
}

#[test]
fn a_calendar_dates_removal_takes_a_weekday_service_out_of_service() {
    let feed = fixture_feed();
    let mut options = wednesday_options(8 * 3600);
    options.date = Some(NaiveDate::from_ymd_opt(2024, 1, 24).unwrap());

    // WEEKDAY, normally active on Wednesdays, is removed on this date;
    // only SPECIAL's 09:00 trip is not active either (it only runs on the
    // 17th), so no trips remain and compilation reports no services.
    assert!(matches!(
        Planner::compile(&feed, &options),
        Err(Error::NoServicesOnDay)
    ));
}

// The Berlin VBB sample feed scenarios are not vendored into this repository;
// point VBB_GTFS_DIR at a local copy to exercise them.
#[test]
#[ignore = "requires VBB_GTFS_DIR pointing at the Berlin sample feed"]
fn innsbrucker_platz_to_alexanderplatz() {
    let dir = std::env::var("VBB_GTFS_DIR").expect("VBB_GTFS_DIR must be set for this test");
    let feed = load_feed_from_dir(std::path::Path::new(&dir)).unwrap();
    let options = PlannerOptions::new(DaySpec::Number(3), 12 * 3600 + 120);
    let planner = Planner::compile(&feed, &options).unwrap();

    let journey = planner
        .query(&stop("Innsbrucker Platz"), &stop("Alexanderplatz"), &options)
        .unwrap()
        .expect("a journey should exist");

    assert!(journey.first().unwrap().departure_time.unwrap() >= 12 * 3600 + 120);
    assert!(journey.last().unwrap().stop_name.contains("Alexanderplatz"));
}

#[test]
#[ignore = "requires VBB_GTFS_DIR pointing at the Berlin sample feed"]
fn schonlein_to_hauptbahnhof_after_last_departure() {
    let dir = std::env::var("VBB_GTFS_DIR").expect("VBB_GTFS_DIR must be set for this test");
    let feed = load_feed_from_dir(std::path::Path::new(&dir)).unwrap();
    let options = PlannerOptions::new(DaySpec::Number(3), 14 * 3600);
    let result = Planner::compile(&feed, &options).map(|planner| {
        planner.query(&stop("Schonlein"), &stop("Berlin Hauptbahnhof"), &options)
    });

    assert!(matches!(result, Err(Error::NoServicesAfterStart)));
}
