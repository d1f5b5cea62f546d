//! # Wave Data Fetching
//!
//! Resolves a locator into the raw CSV text of the wave feed. Two kinds of
//! locator are understood:
//!
//! - **Local file**: `file:///abs/path.csv` or `file:relative.csv`
//! - **Remote**: `http://...` or `https://...`
//!
//! Anything else is rejected before any I/O happens.
//!
//! ## Network Behaviour
//!
//! A remote fetch is a single blocking GET with the transport's default
//! timeouts and redirect policy. There is no retry and no caching: a failed
//! fetch fails the run, and the previously written report stays in place.
//!
//! ## Testing
//!
//! The pipeline only sees the [`SourceFetcher`] trait, so tests can hand it
//! fixture text instead of touching the network.

use crate::ReportError;
use std::fs;
use tracing::{debug, info};

/// Anything that can turn a locator into raw feed text.
pub trait SourceFetcher {
    /// Fetch the complete feed text for `locator`.
    fn fetch(&self, locator: &str) -> Result<String, ReportError>;
}

/// A classified locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator<'a> {
    /// Path on the local filesystem (scheme prefix removed)
    File(&'a str),
    /// Full `http:` or `https:` URL
    Remote(&'a str),
}

impl<'a> Locator<'a> {
    /// Classify a locator string by its scheme.
    ///
    /// # Errors
    /// - [`ReportError::InvalidLocator`] for an empty or blank locator
    /// - [`ReportError::UnsupportedScheme`] for any scheme other than `file:`, `http:`, `https:`
    ///
    /// # Example
    /// ```
    /// use wave_watch_lib::source::Locator;
    ///
    /// assert_eq!(
    ///     Locator::parse("file:///tmp/waves.csv").unwrap(),
    ///     Locator::File("/tmp/waves.csv")
    /// );
    /// assert!(Locator::parse("ftp://example.com/waves.csv").is_err());
    /// ```
    pub fn parse(locator: &'a str) -> Result<Self, ReportError> {
        if locator.trim().is_empty() {
            return Err(ReportError::InvalidLocator);
        }

        if let Some(rest) = locator.strip_prefix("file:") {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            Ok(Locator::File(path))
        } else if locator.starts_with("http:") || locator.starts_with("https:") {
            Ok(Locator::Remote(locator))
        } else {
            Err(ReportError::UnsupportedScheme {
                locator: locator.to_string(),
            })
        }
    }
}

/// Production fetcher: reads local files and performs blocking HTTP GETs.
///
/// Must not be used from inside an async runtime; the blocking client starts
/// its own.
#[derive(Debug, Default)]
pub struct DefaultFetcher {
    client: reqwest::blocking::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn fetch_remote(&self, url: &str) -> Result<String, ReportError> {
        let unavailable = |reason: String| ReportError::SourceUnavailable {
            locator: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP status {}", status)));
        }

        response.text().map_err(|e| unavailable(e.to_string()))
    }
}

impl SourceFetcher for DefaultFetcher {
    fn fetch(&self, locator: &str) -> Result<String, ReportError> {
        match Locator::parse(locator)? {
            Locator::File(path) => {
                info!("Reading wave data from file {}", path);
                read_file(locator, path)
            }
            Locator::Remote(url) => {
                info!("Fetching wave data from {}", url);
                let body = self.fetch_remote(url)?;
                debug!("Fetched {} bytes", body.len());
                Ok(body)
            }
        }
    }
}

fn read_file(locator: &str, path: &str) -> Result<String, ReportError> {
    fs::read_to_string(path).map_err(|e| ReportError::SourceUnavailable {
        locator: locator.to_string(),
        reason: e.to_string(),
    })
}
