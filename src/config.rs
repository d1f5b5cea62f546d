//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the wave-config.toml file.
//! It provides a centralized way to configure the data feed, the report output and the
//! HTTP endpoint that serves it.

use crate::FEED_UTC_OFFSET_HOURS;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "wave-config.toml";

/// Application configuration loaded from wave-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Wave data feed settings
    pub feed: FeedConfig,
    /// Rendered report settings
    pub report: ReportConfig,
    /// HTTP endpoint settings
    pub server: ServerConfig,
}

/// Wave data feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Locator used when none is given on the command line
    pub locator: String,
    /// Leading rows of the CSV treated as header/metadata and skipped
    pub header_rows: usize,
    /// Civil offset of the feed's timestamps, hours east of UTC
    pub utc_offset_hours: i32,
    /// Length of the trailing window in calendar days
    pub window_days: u64,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// File the HTML report is written to (and served from)
    pub output_path: PathBuf,
    /// Map search URL; the `latitude,longitude` pair is appended verbatim
    pub map_base_url: String,
}

/// HTTP endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to listen on
    pub bind_address: String,
    /// TCP port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed: FeedConfig {
                locator: "https://apps.des.qld.gov.au/data-sets/waves/wave-7dayopdata.csv"
                    .to_string(),
                header_rows: 1,
                utc_offset_hours: FEED_UTC_OFFSET_HOURS,
                window_days: 3,
            },
            report: ReportConfig {
                output_path: PathBuf::from("index.html"),
                map_base_url: "https://www.google.com/maps/search/?api=1&query=".to_string(),
            },
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 8080,
            },
        }
    }
}

impl FeedConfig {
    /// The feed's civil offset as a chrono offset.
    ///
    /// Values outside chrono's ±24h range fall back to [`FEED_UTC_OFFSET_HOURS`].
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| {
            warn!(
                "utc_offset_hours {} out of range, using UTC+{}",
                self.utc_offset_hours, FEED_UTC_OFFSET_HOURS
            );
            feed_offset()
        })
    }
}

/// The fixed UTC+10 offset of the wave feed.
pub fn feed_offset() -> FixedOffset {
    FixedOffset::east_opt(FEED_UTC_OFFSET_HOURS * 3600).expect("feed offset should be valid")
}

impl Config {
    /// Load configuration from wave-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration for feed: {}", config.feed.locator);
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format: {}", e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!(
                    "No config file found at {}, using default configuration",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
