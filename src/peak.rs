//! Peak selection: the reading with the greatest significant wave height.

use crate::WaveReading;

/// Return the reading with the greatest significant height.
///
/// Returns `None` for an empty slice. On an exact tie the earliest reading
/// (by slice order) wins, so results do not depend on iteration details.
pub fn select_peak(readings: &[WaveReading]) -> Option<&WaveReading> {
    readings.iter().fold(None, |best, reading| match best {
        Some(current) if reading.significant_height <= current.significant_height => Some(current),
        _ => Some(reading),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(site: &str, height: f64) -> WaveReading {
        WaveReading {
            site_name: site.to_string(),
            epoch_seconds: 1_700_000_000,
            latitude: "-26.7987".to_string(),
            longitude: "153.1330".to_string(),
            significant_height: height,
        }
    }

    #[test]
    fn test_empty_has_no_peak() {
        assert!(select_peak(&[]).is_none());
    }

    #[test]
    fn test_picks_greatest_height() {
        let readings = vec![
            reading("Noosa", 1.27),
            reading("Caloundra", 1.96),
            reading("Hay Point", 0.8),
        ];
        let peak = select_peak(&readings).unwrap();
        assert_eq!(peak.site_name, "Caloundra");
        assert!(readings
            .iter()
            .all(|r| peak.significant_height >= r.significant_height));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let readings = vec![
            reading("X", 2.5),
            reading("Y", 2.5),
            reading("Z", 1.0),
        ];
        assert_eq!(select_peak(&readings).unwrap().site_name, "X");
    }

    #[test]
    fn test_later_greater_reading_replaces_earlier_tie() {
        let readings = vec![reading("X", 2.5), reading("Y", 2.5), reading("Z", 2.6)];
        assert_eq!(select_peak(&readings).unwrap().site_name, "Z");
    }

    #[test]
    fn test_negative_heights_still_compare() {
        let readings = vec![reading("A", -0.5), reading("B", -0.1)];
        assert_eq!(select_peak(&readings).unwrap().site_name, "B");
    }
}
