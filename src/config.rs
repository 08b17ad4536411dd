//! Configuration file structures for the seasons bot.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed by `SEASONS_BOT_`, nested keys being separated
//! by `__` (e.g. `SEASONS_BOT_GATEWAY__URL`).
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Season/bet API
//! gateway:
//!   # Base URL of the API
//!   url: "http://localhost:8080"
//!   # Upper bound for each request, in seconds
//!   timeout_secs: 5
//!
//! # Suppression of duplicated platform events
//! dedup:
//!   window_secs: 5
//!
//! # Game browsing sessions
//! pagination:
//!   ttl_secs: 1800
//!   max_sessions: 500
//!
//! # NFL calendar
//! nfl:
//!   season_start: "2024-09-05"
//!   last_week: 18
//! ```
//!
//! Only `gateway.url` is required.

use std::time::Duration;

use chrono::NaiveDate;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the file.
const ENV_PREFIX: &str = "SEASONS_BOT_";

/// Root configuration structure for the seasons bot.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// Season/bet API configuration
    pub gateway: Api,
    /// Deduplication window configuration
    #[serde(default)]
    pub dedup: Dedup,
    /// Pagination session configuration
    #[serde(default)]
    pub pagination: Pagination,
    /// NFL calendar configuration
    #[serde(default)]
    pub nfl: Nfl,
}

/// Season/bet API configuration.
///
/// # YAML Section
///
/// ```yaml
/// gateway:
///   url: "http://localhost:8080"
///   timeout_secs: 5
/// ```
#[derive(Deserialize, Debug)]
pub struct Api {
    /// Base URL of the API.
    ///
    /// Should include the protocol (http/https). A trailing slash is removed at
    /// load time.
    ///
    /// # Examples
    ///
    /// - `http://localhost:8080`
    /// - `https://bets.example.com/v1`
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Api {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Deduplication window configuration.
#[derive(Deserialize, Debug)]
pub struct Dedup {
    /// Seconds during which a repeated event identifier is ignored
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for Dedup {
    fn default() -> Self {
        Dedup {
            window_secs: default_window_secs(),
        }
    }
}

/// Pagination session configuration.
#[derive(Deserialize, Debug)]
pub struct Pagination {
    /// Idle seconds after which a browsing session expires
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Most browsing sessions kept at once
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            ttl_secs: default_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// NFL calendar configuration.
#[derive(Deserialize, Debug)]
pub struct Nfl {
    /// Date of the first game of week 1, on the US Eastern calendar
    #[serde(default = "default_season_start")]
    pub season_start: NaiveDate,
    /// Last week of the regular season
    #[serde(default = "default_last_week")]
    pub last_week: i64,
}

impl Default for Nfl {
    fn default() -> Self {
        Nfl {
            season_start: default_season_start(),
            last_week: default_last_week(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_window_secs() -> u64 {
    5
}

fn default_ttl_secs() -> u64 {
    30 * 60
}

fn default_max_sessions() -> usize {
    500
}

fn default_season_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 5).unwrap_or(NaiveDate::MIN)
}

fn default_last_week() -> i64 {
    18
}

impl Config {
    /// Loads the configuration from a YAML file merged with the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, a value has the wrong type,
    /// or `gateway.url` is missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        let mut config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        // Normalize the API URL by removing trailing slashes
        while config.gateway.url.ends_with('/') {
            config.gateway.url.pop();
        }

        Ok(config)
    }
}
