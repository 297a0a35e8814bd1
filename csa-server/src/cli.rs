//! `clap` command-line surface: a one-shot query subcommand and a server
//! subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "csa-server", about = "GTFS connection-scan journey planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server described by a TOML config file.
    Serve {
        #[arg(long, default_value = "csa-server.toml")]
        config: PathBuf,
    },
    /// Run a single query against a GTFS directory and print the Journey as JSON.
    Query {
        #[arg(long)]
        gtfs_dir: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// 1..7 (1 = Sunday) or an unambiguous weekday prefix.
        #[arg(long)]
        day: String,
        /// Seconds since midnight, or `HH:MM:SS`.
        #[arg(long)]
        start_time: String,
        /// Treat `--from`/`--to` as GTFS `stop_id` values instead of names.
        #[arg(long)]
        ids: bool,
        #[arg(long)]
        route_pattern: Option<String>,
        #[arg(long)]
        max_transfers: Option<u32>,
        #[arg(long, default_value_t = true)]
        earliest_arrival: bool,
        #[arg(long)]
        include_ids: bool,
    },
}
