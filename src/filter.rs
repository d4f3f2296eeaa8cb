//! Time-window filtering of the raw reading history.

use crate::domain::{Reading, TimeRange};
use chrono::{DateTime, Duration, Utc};

/// Readings within `range` of `now`, preserving most-recent-first order.
///
/// The cutoff is inclusive: a reading stamped exactly `now - range.hours`
/// stays in the window. An empty result is not an error.
pub fn filter_by_range(readings: &[Reading], range: TimeRange, now: DateTime<Utc>) -> Vec<Reading> {
    let cutoff = now - Duration::hours(range.hours);
    readings
        .iter()
        .filter(|reading| reading.timestamp >= cutoff)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RANGES;
    use chrono::TimeZone;

    fn reading_at(hour: u32, minute: u32, temp: Option<f64>) -> Reading {
        Reading {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 11, hour, minute, 0).unwrap(),
            air_temperature: temp,
            air_humidity: None,
            light_percent: None,
            soil_moisture_raw: None,
            soil_temperature: None,
        }
    }

    #[test]
    fn everything_in_window_has_timestamp_at_or_after_cutoff() {
        let now = Utc.with_ymd_and_hms(2024, 5, 11, 12, 0, 0).unwrap();
        let readings: Vec<Reading> = (0..24)
            .map(|h| reading_at(23 - h, 0, Some(20.0)))
            .collect();
        for range in RANGES {
            let cutoff = now - Duration::hours(range.hours);
            for reading in filter_by_range(&readings, range, now) {
                assert!(reading.timestamp >= cutoff);
            }
        }
    }

    #[test]
    fn cutoff_is_inclusive_and_order_is_preserved() {
        let now = Utc.with_ymd_and_hms(2024, 5, 11, 9, 0, 0).unwrap();
        let range = TimeRange {
            label: "1h",
            hours: 1,
        };
        let readings = vec![
            reading_at(8, 45, Some(21.0)),
            reading_at(8, 0, Some(20.0)), // exactly on the cutoff
            reading_at(7, 59, Some(19.0)),
        ];
        let window = filter_by_range(&readings, range, now);
        assert_eq!(window.len(), 2);
        assert!(window[0].timestamp > window[1].timestamp);
    }

    #[test]
    fn filtering_twice_with_the_same_range_is_idempotent() {
        let now = Utc.with_ymd_and_hms(2024, 5, 11, 12, 0, 0).unwrap();
        let range = RANGES[1];
        let readings: Vec<Reading> = (0..12).map(|h| reading_at(h, 30, Some(18.0))).collect();
        let once = filter_by_range(&readings, range, now);
        let twice = filter_by_range(&once, range, now);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_yields_empty_window() {
        let now = Utc.with_ymd_and_hms(2024, 5, 11, 12, 0, 0).unwrap();
        assert!(filter_by_range(&[], RANGES[0], now).is_empty());
    }

    #[test]
    fn all_readings_outside_window_yield_empty() {
        let now = Utc.with_ymd_and_hms(2024, 5, 11, 23, 0, 0).unwrap();
        let readings = vec![reading_at(1, 0, Some(20.0)), reading_at(0, 0, Some(21.0))];
        let range = TimeRange {
            label: "1h",
            hours: 1,
        };
        assert!(filter_by_range(&readings, range, now).is_empty());
    }

    #[test]
    fn day_window_keeps_the_documented_scenario() {
        // 09:00/08:00/06:00 readings with a 24h range at 09:30: all three stay.
        let now = Utc.with_ymd_and_hms(2024, 5, 11, 9, 30, 0).unwrap();
        let readings = vec![
            reading_at(9, 0, Some(20.0)),
            reading_at(8, 0, Some(22.0)),
            reading_at(6, 0, None),
        ];
        let window = filter_by_range(&readings, RANGES[1], now);
        assert_eq!(window.len(), 3);
    }
}
