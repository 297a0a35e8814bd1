//! TOML configuration for `csa-server`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default query options applied when a request omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultQueryOptions {
    #[serde(default = "default_max_transfers")]
    pub max_transfers: Option<u32>,
    #[serde(default = "default_earliest_arrival")]
    pub earliest_arrival: bool,
    #[serde(default)]
    pub include_ids: bool,
}

fn default_max_transfers() -> Option<u32> {
    None
}

fn default_earliest_arrival() -> bool {
    true
}

impl Default for DefaultQueryOptions {
    fn default() -> Self {
        DefaultQueryOptions {
            max_transfers: default_max_transfers(),
            earliest_arrival: default_earliest_arrival(),
            include_ids: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub gtfs_dir: PathBuf,
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    #[serde(default)]
    pub default_query: DefaultQueryOptions,
}

fn default_bind_address() -> SocketAddr {
    ([127, 0, 0, 1], 8080).into()
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
