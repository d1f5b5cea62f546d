//! # Report Pipeline
//!
//! Runs fetch → parse → filter → select → render → write in order. Each stage
//! finishes before the next starts, and any error returns before the write,
//! leaving the previously written report untouched.

use crate::config::Config;
use crate::source::SourceFetcher;
use crate::window::TimeWindow;
use crate::{peak, records, report, ReportDocument, ReportError};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Build the report for the window ending at `today` and write it.
///
/// An empty window is not an error: the fallback message is written instead.
///
/// # Errors
/// Any [`ReportError`] from fetching, parsing or writing.
///
/// # Example
/// ```no_run
/// use chrono::Local;
/// use wave_watch_lib::config::Config;
/// use wave_watch_lib::pipeline::create_page;
/// use wave_watch_lib::source::DefaultFetcher;
///
/// let config = Config::default();
/// let today = Local::now().date_naive();
/// let doc = create_page(&DefaultFetcher::new(), &config.feed.locator, today, &config)?;
/// println!("wrote {}", doc.path.display());
/// # Ok::<(), wave_watch_lib::ReportError>(())
/// ```
pub fn create_page(
    fetcher: &dyn SourceFetcher,
    locator: &str,
    today: NaiveDate,
    config: &Config,
) -> Result<ReportDocument, ReportError> {
    let raw = fetcher.fetch(locator)?;

    let readings = records::parse(&raw, config.feed.header_rows)?;
    info!("Parsed {} readings", readings.len());

    let offset = config.feed.offset();
    let window = TimeWindow::trailing(today, config.feed.window_days, offset);
    let in_window = window.filter(readings);
    info!("{} readings inside window {}", in_window.len(), window);

    let peak = peak::select_peak(&in_window);
    match peak {
        Some(p) => info!(
            "Peak: {} at {:.3}m ({},{})",
            p.site_name, p.significant_height, p.latitude, p.longitude
        ),
        None => warn!("No readings in window, rendering fallback message"),
    }

    let html = report::render(peak, offset, &config.report.map_base_url);
    report::write(html, &config.report.output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    struct FailingFetcher;

    impl SourceFetcher for FailingFetcher {
        fn fetch(&self, locator: &str) -> Result<String, ReportError> {
            Err(ReportError::SourceUnavailable {
                locator: locator.to_string(),
                reason: "HTTP status 503 Service Unavailable".to_string(),
            })
        }
    }

    struct TextFetcher(&'static str);

    impl SourceFetcher for TextFetcher {
        fn fetch(&self, _locator: &str) -> Result<String, ReportError> {
            Ok(self.0.to_string())
        }
    }

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.report.output_path = dir.join("index.html");
        config
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()
    }

    #[test]
    fn test_fetch_failure_keeps_previous_report() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.report.output_path, "previous").unwrap();

        let result = create_page(&FailingFetcher, "https://example.com/w.csv", today(), &config);

        assert!(matches!(result, Err(ReportError::SourceUnavailable { .. })));
        assert_eq!(
            fs::read_to_string(&config.report.output_path).unwrap(),
            "previous"
        );
    }

    #[test]
    fn test_malformed_feed_keeps_previous_report() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.report.output_path, "previous").unwrap();

        let fetcher = TextFetcher("Site,a,b,c,d,e,f,g\nCaloundra,1,soon,x,-26,153,1.0,2.0\n");
        let result = create_page(&fetcher, "file:feed.csv", today(), &config);

        assert!(matches!(
            result,
            Err(ReportError::MalformedRecord { row: 1, .. })
        ));
        assert_eq!(
            fs::read_to_string(&config.report.output_path).unwrap(),
            "previous"
        );
    }

    #[test]
    fn test_empty_feed_renders_fallback() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let doc = create_page(&TextFetcher(""), "file:feed.csv", today(), &config).unwrap();

        assert!(doc.html.contains(report::NO_DATA_MESSAGE));
        assert_eq!(fs::read_to_string(&doc.path).unwrap(), doc.html);
    }
}
