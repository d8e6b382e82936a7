//! Relay configuration loaded from environment variables.
//!
//! Every setting has a default so the server starts with no environment at
//! all. A variable that is set but cannot be parsed is a startup error.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::broadcast::DEFAULT_MAILBOX_CAPACITY;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "hangout=debug,tower_http=debug";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Top-level relay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Socket address the HTTP server binds to
    pub listen_addr: SocketAddr,

    /// Pending messages kept per subscriber before the oldest is dropped
    pub mailbox_capacity: usize,

    /// How often idle connections are pinged to detect dead peers
    pub heartbeat_interval: Duration,
}

impl RelayConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = parse_var(&lookup, "LISTEN_ADDR")?
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mailbox_capacity = parse_var::<usize, _>(&lookup, "MAILBOX_CAPACITY")?
            .unwrap_or(DEFAULT_MAILBOX_CAPACITY)
            .max(1);

        let heartbeat_secs = parse_var::<u64, _>(&lookup, "HEARTBEAT_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_HEARTBEAT_INTERVAL_SECS)
            .max(1);

        Ok(Self {
            listen_addr,
            mailbox_capacity,
            heartbeat_interval: Duration::from_secs(heartbeat_secs),
        })
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_INTERVAL_SECS),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}
