mod cli;
mod config;
mod server;

use std::net::TcpListener;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csa_core::prelude::*;

use cli::{Cli, Command};
use config::ServerConfig;
use server::AppState;

type BoxResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> BoxResult<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    tracing_log::LogTracer::init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { config } => serve(&config),
        Command::Query {
            gtfs_dir,
            from,
            to,
            day,
            start_time,
            ids,
            route_pattern,
            max_transfers,
            earliest_arrival,
            include_ids,
        } => one_shot_query(
            &gtfs_dir,
            &from,
            &to,
            &day,
            &start_time,
            ids,
            route_pattern,
            max_transfers,
            earliest_arrival,
            include_ids,
        ),
    }
}

fn parse_day(text: &str) -> DaySpec {
    match text.parse::<u8>() {
        Ok(n) => DaySpec::Number(n),
        Err(_) => DaySpec::Name(text.to_string()),
    }
}

fn parse_time_arg(text: &str) -> Result<Time> {
    match text.parse::<u32>() {
        Ok(seconds) => Ok(seconds),
        Err(_) => TimeSpec::Clock(text.to_string()).to_seconds(),
    }
}

fn stop_query(text: &str, is_id: bool) -> StopQuery {
    if is_id {
        StopQuery::Id(text.to_string())
    } else {
        StopQuery::Name(text.to_string())
    }
}

#[allow(clippy::too_many_arguments)]
fn one_shot_query(
    gtfs_dir: &std::path::Path,
    from: &str,
    to: &str,
    day: &str,
    start_time: &str,
    ids: bool,
    route_pattern: Option<String>,
    max_transfers: Option<u32>,
    earliest_arrival: bool,
    include_ids: bool,
) -> BoxResult<()> {
    let feed = load_feed_from_dir(gtfs_dir)?;
    let mut options = PlannerOptions::new(parse_day(day), parse_time_arg(start_time)?);
    options.route_pattern = route_pattern;
    options.max_transfers = max_transfers;
    options.earliest_arrival = earliest_arrival;
    options.include_ids = include_ids;

    let planner = Planner::compile(&feed, &options)?;
    let journey = planner.query(&stop_query(from, ids), &stop_query(to, ids), &options)?;
    println!("{}", serde_json::to_string_pretty(&journey)?);
    Ok(())
}

fn serve(config_path: &std::path::Path) -> BoxResult<()> {
    let config = ServerConfig::load(config_path)?;
    let feed = load_feed_from_dir(&config.gtfs_dir)?;
    let bind_address = config.bind_address;
    let state = Arc::new(AppState { feed, config });
    let router = server::build_router(state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(bind_address)?;
        listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(listener)?;
        tracing::info!(%bind_address, "csa-server listening");
        axum::serve(listener, router).await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    })
}
