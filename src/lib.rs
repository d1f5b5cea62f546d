//! # Wave Watch Core Library
//!
//! This library answers one question: "where was the best wave in the last few
//! days?" It pulls the Queensland wave-buoy feed (or a local copy of it), keeps
//! the readings of the trailing three days, picks the highest significant wave
//! height and renders a one-page HTML report that the binary then serves.
//!
//! ## Data Flow
//!
//! The pipeline is strictly linear and synchronous. Each stage consumes the
//! previous stage's output in full:
//!
//! 1. **Fetch** ([`source`]): resolve a `file:` or `http(s):` locator into raw CSV text
//! 2. **Parse** ([`records`]): turn CSV rows into typed [`WaveReading`]s
//! 3. **Filter** ([`window`]): keep readings strictly inside the trailing window
//! 4. **Select** ([`peak`]): pick the reading with the greatest height
//! 5. **Render** ([`report`]): write the HTML document (or a fallback message)
//!
//! [`pipeline::create_page`] wires the stages together; [`server`] exposes the
//! written document over `GET /`.
//!
//! ## Time Handling
//!
//! The feed reports epoch seconds and is read in a fixed UTC+10 civil offset
//! ([`FEED_UTC_OFFSET_HOURS`]). No time zone database is consulted.
//!
//! ## Core Types
//!
//! - [`WaveReading`]: one parsed row of the feed
//! - [`ReportDocument`]: the rendered HTML plus where it was written
//! - [`ReportError`]: every fatal condition the pipeline can hit

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub mod config;
pub mod peak;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod server;
pub mod source;
pub mod window;

/// Civil offset of the wave feed, in hours east of UTC.
///
/// The Queensland feed stamps readings in AEST without daylight saving, so a
/// fixed offset is exact. [`config::FeedConfig::utc_offset_hours`] defaults to
/// this value.
pub const FEED_UTC_OFFSET_HOURS: i32 = 10;

/// A single buoy observation, parsed from one feed row.
///
/// Latitude and longitude are kept as the feed's text: they are only ever
/// concatenated into a map link, never used in arithmetic, so keeping them
/// verbatim avoids float formatting drift (`153.1330` stays `153.1330`).
///
/// # Example
/// ```
/// use wave_watch_lib::WaveReading;
///
/// let reading = WaveReading {
///     site_name: "Caloundra".to_string(),
///     epoch_seconds: 1_700_000_000,
///     latitude: "-26.7987".to_string(),
///     longitude: "153.1330".to_string(),
///     significant_height: 1.96,
/// };
///
/// assert_eq!(reading.coordinates(), "-26.7987,153.1330");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaveReading {
    /// Station name, used verbatim in the report and the map link text
    pub site_name: String,
    /// Observation time in seconds since the Unix epoch
    pub epoch_seconds: i64,
    /// Latitude as printed in the feed
    pub latitude: String,
    /// Longitude as printed in the feed
    pub longitude: String,
    /// Significant wave height (Hsig) in metres
    pub significant_height: f64,
}

impl WaveReading {
    /// The `latitude,longitude` pair used as the map query.
    pub fn coordinates(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// The rendered report and the file it was persisted to.
///
/// One document is produced per run and it fully replaces the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportDocument {
    /// Complete HTML text
    pub html: String,
    /// Location the HTML was written to
    pub path: PathBuf,
}

/// Errors that abort a pipeline run.
///
/// Every variant is fatal: the run stops before the document is written, so
/// the previously served report stays in place. An empty window is not an
/// error; it is rendered as a fallback message instead.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The locator was empty or blank
    #[error("locator cannot be empty")]
    InvalidLocator,

    /// The locator uses a scheme other than `file:`, `http:` or `https:`
    #[error("unsupported locator scheme: {locator}")]
    UnsupportedScheme { locator: String },

    /// The file could not be read, or the remote fetch failed
    #[error("failed to fetch wave data from {locator}: {reason}")]
    SourceUnavailable { locator: String, reason: String },

    /// A data row could not be turned into a reading
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The report could not be written
    #[error("report output: {0}")]
    Output(#[from] io::Error),
}
