//! # HTML Report Rendering
//!
//! Formats the peak reading into the one-page report and persists it.
//!
//! ## Document Shapes
//!
//! With a peak:
//! ```text
//! <html><body>You should have been at Caloundra on Friday - it was gnarly -
//! waves up to 1.960m! <a ... href="https://www.google.com/maps/search/?api=1&query=-26.7987,153.1330">Open Map of Caloundra</a></body></html>
//! ```
//!
//! Without one, a fixed "data is not available" message and no link.
//!
//! ## Escaping
//!
//! Site names and coordinates come from the feed and are HTML-escaped before
//! being embedded. Ordinary station names and decimal coordinates contain no
//! escapable characters, so they appear in the output verbatim.
//!
//! ## Persistence
//!
//! The report is written to a sibling temporary file and renamed over the
//! target, so a concurrent reader sees either the old or the new document.

use crate::window::civil_time;
use crate::{ReportDocument, ReportError, WaveReading};
use chrono::{Datelike, FixedOffset, Weekday};
use std::fs;
use std::path::Path;
use tracing::info;

/// Body text of the report when the window holds no readings
pub const NO_DATA_MESSAGE: &str = "Data is not available for the past three days";

const LINK_STYLE: &str = "color: #007bff; text-decoration: none; font-weight: bold;";

/// Render the report for `peak`, or the fallback message for `None`.
///
/// `map_base_url` is the map search URL the `latitude,longitude` pair is
/// appended to.
pub fn render(peak: Option<&WaveReading>, offset: FixedOffset, map_base_url: &str) -> String {
    let body = match peak {
        Some(reading) => describe_peak(reading, offset, map_base_url),
        None => NO_DATA_MESSAGE.to_string(),
    };
    format!("<html><body>{}</body></html>", body)
}

fn describe_peak(reading: &WaveReading, offset: FixedOffset, map_base_url: &str) -> String {
    let site = escape_html(&reading.site_name);
    let day = weekday_name(reading.epoch_seconds, offset).unwrap_or("an unknown day");

    format!(
        "You should have been at {} on {} - it was gnarly - waves up to {:.3}m! {}",
        site,
        day,
        reading.significant_height,
        map_link(reading, map_base_url)
    )
}

/// Anchor pointing the map service at the reading's coordinates.
pub fn map_link(reading: &WaveReading, map_base_url: &str) -> String {
    format!(
        "<a style=\"{}\" class=\"map-link\" target=\"_blank\" href=\"{}{},{}\">Open Map of {}</a>",
        LINK_STYLE,
        map_base_url,
        escape_html(&reading.latitude),
        escape_html(&reading.longitude),
        escape_html(&reading.site_name)
    )
}

/// Full English day-of-week name of `epoch_seconds` in `offset`.
pub fn weekday_name(epoch_seconds: i64, offset: FixedOffset) -> Option<&'static str> {
    let name = match civil_time(epoch_seconds, offset)?.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    Some(name)
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Persist `html` at `path`, replacing any previous report.
pub fn write(html: String, path: &Path) -> Result<ReportDocument, ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, &html)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Report written to {}", path.display());
    Ok(ReportDocument {
        html,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::feed_offset;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    const MAPS: &str = "https://www.google.com/maps/search/?api=1&query=";

    /// 2024-06-14 00:00 in UTC+10, a Friday
    fn friday_midnight() -> i64 {
        NaiveDate::from_ymd_opt(2024, 6, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp()
            - 36_000
    }

    fn caloundra() -> WaveReading {
        WaveReading {
            site_name: "Caloundra".to_string(),
            epoch_seconds: friday_midnight(),
            latitude: "-26.7987".to_string(),
            longitude: "153.1330".to_string(),
            significant_height: 1.96,
        }
    }

    #[test]
    fn test_render_peak() {
        let html = render(Some(&caloundra()), feed_offset(), MAPS);

        assert!(html.contains(
            "You should have been at Caloundra on Friday - it was gnarly - waves up to 1.960m!"
        ));
        assert!(html.contains(
            "href=\"https://www.google.com/maps/search/?api=1&query=-26.7987,153.1330\""
        ));
        assert!(html.contains("Open Map of Caloundra</a>"));
        assert!(html.starts_with("<html><body>"));
        assert!(html.ends_with("</body></html>"));
        assert!(!html.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_render_absent_peak() {
        let html = render(None, feed_offset(), MAPS);
        assert_eq!(
            html,
            "<html><body>Data is not available for the past three days</body></html>"
        );
        assert!(!html.contains("href="));
    }

    #[test]
    fn test_height_has_three_decimals() {
        let mut reading = caloundra();
        reading.significant_height = 2.0;
        assert!(render(Some(&reading), feed_offset(), MAPS).contains("waves up to 2.000m!"));

        reading.significant_height = 0.12345;
        assert!(render(Some(&reading), feed_offset(), MAPS).contains("waves up to 0.123m!"));
    }

    #[test]
    fn test_weekday_uses_feed_offset() {
        // Friday 00:00 in UTC+10 is still Thursday in UTC
        assert_eq!(weekday_name(friday_midnight(), feed_offset()), Some("Friday"));
        assert_eq!(
            weekday_name(friday_midnight(), FixedOffset::east_opt(0).unwrap()),
            Some("Thursday")
        );
    }

    #[test]
    fn test_all_weekday_names_are_full() {
        let names: Vec<_> = (0..7)
            .filter_map(|d| weekday_name(friday_midnight() + d * 86_400, feed_offset()))
            .collect();
        assert_eq!(
            names,
            vec!["Friday", "Saturday", "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"]
        );
    }

    #[test]
    fn test_feed_text_is_escaped() {
        let mut reading = caloundra();
        reading.site_name = "<b>Tweed & \"Co\"</b>".to_string();
        let html = render(Some(&reading), feed_offset(), MAPS);

        assert!(html.contains("at &lt;b&gt;Tweed &amp; &quot;Co&quot;&lt;/b&gt; on"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_write_replaces_previous_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "old report that is much longer than the new one").unwrap();

        let doc = write(render(None, feed_offset(), MAPS), &path).unwrap();

        assert_eq!(doc.path, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), doc.html);
        // No temporary file left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("public").join("index.html");

        write("<html></html>".to_string(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }
}
