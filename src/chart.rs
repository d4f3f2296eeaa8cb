//! Downsampling a windowed subset into a chart-ready series.
//!
//! The chart widget renders a fixed-width line: at most [`MAX_POINTS`]
//! values, with roughly six labelled ticks regardless of how many points
//! survive. Values never get thinned below `MAX_POINTS`; only labels do.

use crate::domain::{Reading, Sensor, TimeRange};
use chrono::{DateTime, Local, Utc};

/// Points the chart renders at most; older readings in the window are
/// silently dropped.
pub const MAX_POINTS: usize = 30;

/// Labelled ticks the step size aims for.
const TARGET_LABELS: usize = 6;

/// A label+value series in chronological order.
///
/// `labels` and `values` always have the same length; points without a
/// visible tick carry an empty label.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Downsample `windowed` (most-recent-first) for one sensor.
///
/// Takes the `MAX_POINTS` most recent readings, reverses them to
/// chronological order and drops the ones without a value for `sensor`.
/// Returns `None` when nothing survives, which the caller renders as a
/// "no data" state.
pub fn sample(windowed: &[Reading], sensor: Sensor, range: TimeRange) -> Option<ChartSeries> {
    let points: Vec<(DateTime<Utc>, f64)> = windowed
        .iter()
        .take(MAX_POINTS)
        .rev()
        .filter_map(|reading| sensor.value(reading).map(|v| (reading.timestamp, v)))
        .collect();

    if points.is_empty() {
        return None;
    }

    let step = (points.len() / TARGET_LABELS).max(1);
    let labels = points
        .iter()
        .enumerate()
        .map(|(i, (timestamp, _))| {
            if i % step == 0 {
                format_label(*timestamp, range)
            } else {
                String::new()
            }
        })
        .collect();
    let values = points.iter().map(|(_, value)| *value).collect();

    Some(ChartSeries { labels, values })
}

/// Tick format for a range band, chrono syntax.
///
/// The 1h and 24h bands intentionally share a format.
pub fn label_format(hours: i64) -> &'static str {
    match hours {
        _ if hours <= 24 => "%H:%M",
        _ if hours <= 168 => "%a %H",
        _ => "%b %-d",
    }
}

/// Tick text in local time.
fn format_label(timestamp: DateTime<Utc>, range: TimeRange) -> String {
    timestamp
        .with_timezone(&Local)
        .format(label_format(range.hours))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RANGES;
    use chrono::{Duration, TimeZone};

    fn series_of(count: usize, value: impl Fn(usize) -> Option<f64>) -> Vec<Reading> {
        // `count` readings spaced 90 seconds apart, most recent first.
        let newest = Utc.with_ymd_and_hms(2024, 5, 11, 12, 0, 0).unwrap();
        (0..count)
            .map(|i| Reading {
                timestamp: newest - Duration::seconds(90 * i as i64),
                air_temperature: value(i),
                air_humidity: None,
                light_percent: None,
                soil_moisture_raw: None,
                soil_temperature: None,
            })
            .collect()
    }

    #[test]
    fn forty_readings_keep_the_most_recent_thirty() {
        let windowed = series_of(40, |i| Some(i as f64));
        let series = sample(&windowed, Sensor::Temperature, RANGES[0]).unwrap();
        assert_eq!(series.values.len(), 30);
        assert_eq!(series.labels.len(), 30);
        // Chronological order: oldest surviving point (index 29) first.
        assert_eq!(series.values[0], 29.0);
        assert_eq!(series.values[29], 0.0);

        // step = 30 / 6 = 5 -> exactly 6 labelled ticks.
        let labelled: Vec<usize> = series
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_empty())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(labelled, vec![0, 5, 10, 15, 20, 25]);
    }

    #[test]
    fn fewer_than_six_points_label_everything() {
        let windowed = series_of(4, |i| Some(i as f64));
        let series = sample(&windowed, Sensor::Temperature, RANGES[1]).unwrap();
        assert_eq!(series.values.len(), 4);
        assert!(series.labels.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn label_count_always_equals_point_count() {
        for count in [1, 5, 6, 7, 29, 30, 31, 100] {
            let windowed = series_of(count, |i| Some(i as f64));
            let series = sample(&windowed, Sensor::Temperature, RANGES[2]).unwrap();
            assert_eq!(series.labels.len(), series.values.len());
            assert!(series.values.len() <= MAX_POINTS);

            let step = (series.values.len() / 6).max(1);
            let expected = series.values.len().div_ceil(step);
            let non_empty = series.labels.iter().filter(|l| !l.is_empty()).count();
            assert_eq!(non_empty, expected);
        }
    }

    #[test]
    fn missing_values_are_dropped_after_truncation() {
        // Newest 30 readings carry no temperature; the older ones do. The
        // truncation happens first, so nothing survives.
        let windowed = series_of(40, |i| if i < 30 { None } else { Some(20.0) });
        assert!(sample(&windowed, Sensor::Temperature, RANGES[1]).is_none());

        // Gaps inside the kept 30 shrink the series instead.
        let windowed = series_of(30, |i| if i % 2 == 0 { Some(20.0) } else { None });
        let series = sample(&windowed, Sensor::Temperature, RANGES[1]).unwrap();
        assert_eq!(series.values.len(), 15);
    }

    #[test]
    fn all_missing_yields_none() {
        let windowed = series_of(10, |_| None);
        assert!(sample(&windowed, Sensor::Temperature, RANGES[1]).is_none());
        assert!(sample(&[], Sensor::Temperature, RANGES[1]).is_none());
    }

    #[test]
    fn label_format_bands() {
        // 1h and 24h intentionally identical.
        assert_eq!(label_format(1), "%H:%M");
        assert_eq!(label_format(24), "%H:%M");
        assert_eq!(label_format(168), "%a %H");
        assert_eq!(label_format(720), "%b %-d");
    }
}
