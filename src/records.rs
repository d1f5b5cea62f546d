//! # Wave Feed Parsing
//!
//! Turns the raw CSV text of the wave feed into [`WaveReading`]s.
//!
//! ## Feed Layout
//!
//! ```text
//! Site,SiteNumber,Seconds,DateTime,Latitude,Longitude,Hsig,Hmax,...
//! Caloundra,54,1700000000,2023-11-15T08:13,-26.7987,153.1330,1.960,2.500,...
//! ```
//!
//! Columns are positional. Only site, seconds, latitude, longitude and Hsig
//! are used; trailing columns (Hmax, Tp, direction, ...) are ignored.
//!
//! Parsing is all-or-nothing: one bad row fails the whole feed with
//! [`ReportError::MalformedRecord`].

use crate::{ReportError, WaveReading};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

/// Column holding the station name
pub const COL_SITE: usize = 0;
/// Column holding the observation time in epoch seconds
pub const COL_SECONDS: usize = 2;
/// Column holding the latitude text
pub const COL_LATITUDE: usize = 4;
/// Column holding the longitude text
pub const COL_LONGITUDE: usize = 5;
/// Column holding the significant wave height (Hsig) in metres
pub const COL_HSIG: usize = 6;

/// Fewest fields a data row may have
const MIN_FIELDS: usize = COL_HSIG + 1;

/// Parse feed text into readings, skipping `header_rows` leading rows.
///
/// Readings come back in input order. Row numbers in errors count every
/// CSV record from zero, header rows included; blank lines are not records.
///
/// # Example
/// ```
/// use wave_watch_lib::records::parse;
///
/// let csv = "Site,SiteNumber,Seconds,DateTime,Latitude,Longitude,Hsig,Hmax\n\
///            Caloundra,54,1700000000,x,-26.7987,153.1330,1.960,2.500\n";
/// let readings = parse(csv, 1).unwrap();
///
/// assert_eq!(readings.len(), 1);
/// assert_eq!(readings[0].site_name, "Caloundra");
/// assert_eq!(readings[0].significant_height, 1.96);
/// ```
pub fn parse(raw: &str, header_rows: usize) -> Result<Vec<WaveReading>, ReportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut readings = Vec::new();
    for (row, record) in reader.records().enumerate().skip(header_rows) {
        let record = record.map_err(|e| malformed(row, e.to_string()))?;
        readings.push(parse_row(row, &record)?);
    }

    debug!("Parsed {} wave readings", readings.len());
    Ok(readings)
}

fn parse_row(row: usize, record: &StringRecord) -> Result<WaveReading, ReportError> {
    if record.len() < MIN_FIELDS {
        return Err(malformed(
            row,
            format!("expected at least {} fields, found {}", MIN_FIELDS, record.len()),
        ));
    }

    let field = |idx: usize| record.get(idx).unwrap_or_default();

    let epoch_seconds: i64 = field(COL_SECONDS)
        .trim()
        .parse()
        .map_err(|_| malformed(row, format!("invalid epoch seconds {:?}", field(COL_SECONDS))))?;

    let significant_height: f64 = field(COL_HSIG)
        .trim()
        .parse()
        .ok()
        .filter(|h: &f64| h.is_finite())
        .ok_or_else(|| malformed(row, format!("invalid wave height {:?}", field(COL_HSIG))))?;

    Ok(WaveReading {
        site_name: field(COL_SITE).to_string(),
        epoch_seconds,
        latitude: field(COL_LATITUDE).to_string(),
        longitude: field(COL_LONGITUDE).to_string(),
        significant_height,
    })
}

fn malformed(row: usize, reason: String) -> ReportError {
    ReportError::MalformedRecord { row, reason }
}
