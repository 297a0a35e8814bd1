//! Axum HTTP surface over the `csa_core` query API. A thin layer that
//! never touches timetable or search internals directly.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use csa_core::prelude::*;

use crate::config::ServerConfig;

pub struct AppState {
    pub feed: Feed,
    pub config: ServerConfig,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/journey", post(journey))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StopSelector {
    Id { stop_id: String },
    Name { name: String },
    Coordinates { lon: f64, lat: f64 },
}

impl From<StopSelector> for StopQuery {
    fn from(selector: StopSelector) -> Self {
        match selector {
            StopSelector::Id { stop_id } => StopQuery::Id(stop_id),
            StopSelector::Name { name } => StopQuery::Name(name),
            StopSelector::Coordinates { lon, lat } => StopQuery::Coordinates(lon, lat),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DayInput {
    Number(u8),
    Name(String),
}

impl From<DayInput> for DaySpec {
    fn from(day: DayInput) -> Self {
        match day {
            DayInput::Number(n) => DaySpec::Number(n),
            DayInput::Name(text) => DaySpec::Name(text),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeInput {
    Seconds(u32),
    Clock(String),
}

impl TimeInput {
    fn to_seconds(self) -> Result<Time> {
        match self {
            TimeInput::Seconds(s) => TimeSpec::Seconds(s).to_seconds(),
            TimeInput::Clock(text) => TimeSpec::Clock(text).to_seconds(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JourneyRequest {
    from: StopSelector,
    to: StopSelector,
    day: DayInput,
    start_time: TimeInput,
    route_pattern: Option<String>,
    earliest_arrival: Option<bool>,
    include_ids: Option<bool>,
    max_transfers: Option<u32>,
    #[serde(default)]
    grep_fixed: bool,
}

#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    journey: Option<Journey>,
}

async fn journey(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JourneyRequest>,
) -> Result<Json<JourneyResponse>, ApiError> {
    let start_time = request.start_time.to_seconds()?;
    let defaults = &state.config.default_query;

    let mut options = PlannerOptions::new(request.day.into(), start_time);
    options.route_pattern = request.route_pattern;
    options.earliest_arrival = request.earliest_arrival.unwrap_or(defaults.earliest_arrival);
    options.include_ids = request.include_ids.unwrap_or(defaults.include_ids);
    options.max_transfers = request.max_transfers.or(defaults.max_transfers);
    options.grep_fixed = request.grep_fixed;

    let planner = Planner::compile(&state.feed, &options)?;
    let journey = planner.query(&request.from.into(), &request.to.into(), &options)?;

    Ok(Json(JourneyResponse { journey }))
}

struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::StationNotFound(_) => StatusCode::NOT_FOUND,
            Error::BadTime
            | Error::UnknownDay(_)
            | Error::AmbiguousDay(_)
            | Error::NoRoutesMatch
            | Error::SillyPattern
            | Error::LengthMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::NoServicesOnDay | Error::NoServicesAfterStart => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidPattern(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Csv(_) | Error::InvalidField { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.0.to_string()).into_response()
    }
}
