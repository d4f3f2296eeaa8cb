//! Core data model: readings, time ranges, sensors and alerts.
//!
//! Readings arrive over the wire as [`RawReading`] (timestamp still a
//! string) and are normalized into [`Reading`] before anything downstream
//! sees them. A reading whose timestamp cannot be parsed is dropped at that
//! boundary, never later.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// One sensor sample. Immutable once received.
///
/// A `None` field means the sensor was not sampled in this reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub air_temperature: Option<f64>,
    pub air_humidity: Option<f64>,
    pub light_percent: Option<f64>,
    pub soil_moisture_raw: Option<f64>,
    pub soil_temperature: Option<f64>,
}

/// Wire-format reading as returned by the monitor API, mirroring the JSON
/// payload 1:1.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReading {
    pub timestamp: String,
    #[serde(default)]
    pub air_temperature: Option<f64>,
    #[serde(default)]
    pub air_humidity: Option<f64>,
    #[serde(default)]
    pub light_percent: Option<f64>,
    #[serde(default)]
    pub soil_moisture_raw: Option<f64>,
    #[serde(default)]
    pub soil_temperature: Option<f64>,
}

impl RawReading {
    /// Normalize into a typed [`Reading`].
    ///
    /// Returns `None` when the timestamp cannot be parsed; callers drop the
    /// reading rather than failing the whole payload.
    pub fn into_reading(self) -> Option<Reading> {
        let timestamp = parse_timestamp(&self.timestamp)?;
        Some(Reading {
            timestamp,
            air_temperature: self.air_temperature,
            air_humidity: self.air_humidity,
            light_percent: self.light_percent,
            soil_moisture_raw: self.soil_moisture_raw,
            soil_temperature: self.soil_temperature,
        })
    }
}

/// Best-effort timestamp parsing: RFC 3339, then the two datetime shapes
/// the logger emits. Naive values are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// A named history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub label: &'static str,
    /// Window length; always positive.
    pub hours: i64,
}

/// The ranges the history screen offers; exactly one is selected at a time.
pub const RANGES: [TimeRange; 4] = [
    TimeRange { label: "1h", hours: 1 },
    TimeRange { label: "24h", hours: 24 },
    TimeRange { label: "Week", hours: 168 },
    TimeRange { label: "Month", hours: 720 },
];

/// Initial selection (24h).
pub const DEFAULT_RANGE: TimeRange = RANGES[1];

impl TimeRange {
    /// Look up one of the offered ranges by its label.
    pub fn from_label(label: &str) -> Option<TimeRange> {
        RANGES
            .iter()
            .copied()
            .find(|range| range.label.eq_ignore_ascii_case(label))
    }
}

/// A supported sensor.
///
/// Each variant knows which [`Reading`] field it reads and how it is
/// presented (unit, decimal places, color token, optimal range), so a
/// sensor name resolves to its field accessor at compile time instead of
/// through a string-keyed map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Temperature,
    Humidity,
    Light,
    Moisture,
    SoilTemp,
}

/// All supported sensors, in home-screen order.
pub const SENSORS: [Sensor; 5] = [
    Sensor::Light,
    Sensor::Temperature,
    Sensor::Humidity,
    Sensor::Moisture,
    Sensor::SoilTemp,
];

impl Sensor {
    /// Resolve a sensor identifier; unknown names fall back to
    /// `Temperature`.
    pub fn from_name(name: &str) -> Sensor {
        match name {
            "humidity" => Sensor::Humidity,
            "light" => Sensor::Light,
            "moisture" => Sensor::Moisture,
            "soiltemp" => Sensor::SoilTemp,
            _ => Sensor::Temperature,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sensor::Temperature => "temperature",
            Sensor::Humidity => "humidity",
            Sensor::Light => "light",
            Sensor::Moisture => "moisture",
            Sensor::SoilTemp => "soiltemp",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Sensor::Temperature => "Temperature",
            Sensor::Humidity => "Humidity",
            Sensor::Light => "Light",
            Sensor::Moisture => "Soil Moisture",
            Sensor::SoilTemp => "Soil Temperature",
        }
    }

    /// This sensor's value in one reading, if it was sampled.
    pub fn value(self, reading: &Reading) -> Option<f64> {
        match self {
            Sensor::Temperature => reading.air_temperature,
            Sensor::Humidity => reading.air_humidity,
            Sensor::Light => reading.light_percent,
            Sensor::Moisture => reading.soil_moisture_raw,
            Sensor::SoilTemp => reading.soil_temperature,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Sensor::Temperature | Sensor::SoilTemp => "°C",
            Sensor::Humidity | Sensor::Light => "%",
            Sensor::Moisture => "",
        }
    }

    /// Decimal places used when formatting a value for display.
    pub fn decimals(self) -> usize {
        match self {
            Sensor::Temperature | Sensor::SoilTemp => 1,
            Sensor::Humidity | Sensor::Light | Sensor::Moisture => 0,
        }
    }

    /// Color token a chart renderer draws this sensor's series with.
    #[allow(dead_code)]
    pub fn color(self) -> &'static str {
        match self {
            Sensor::Temperature => "#F5A623",
            Sensor::Humidity => "#50E3C2",
            Sensor::Light => "#FF6B6B",
            Sensor::Moisture => "#4A90E2",
            Sensor::SoilTemp => "#8B4513",
        }
    }

    pub fn optimal_range(self) -> &'static str {
        match self {
            Sensor::Temperature => "18–26°C",
            Sensor::Humidity => "40–60%",
            Sensor::Light => "30–80%",
            Sensor::Moisture => "300–700",
            Sensor::SoilTemp => "15–25°C",
        }
    }
}

/// One alert from the alert feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertEvent {
    /// Category, e.g. `low_moisture`; feeds the dedup signature.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human text shown in the banner and in notifications.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(timestamp: &str) -> RawReading {
        RawReading {
            timestamp: timestamp.to_string(),
            air_temperature: Some(21.5),
            air_humidity: None,
            light_percent: None,
            soil_moisture_raw: None,
            soil_temperature: None,
        }
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let ts = parse_timestamp("2024-05-11T10:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 11, 8, 30, 0).unwrap());
    }

    #[test]
    fn parses_naive_timestamps_as_utc() {
        let ts = parse_timestamp("2024-05-11 10:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 11, 10, 30, 0).unwrap());

        let ts = parse_timestamp("2024-05-11T10:30:00.250").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-40 99:99:99").is_none());
    }

    #[test]
    fn unparsable_timestamp_drops_the_reading() {
        assert!(raw("not a date").into_reading().is_none());

        let reading = raw("2024-05-11 10:30:00").into_reading().unwrap();
        assert_eq!(reading.air_temperature, Some(21.5));
    }

    #[test]
    fn unknown_sensor_name_falls_back_to_temperature() {
        assert_eq!(Sensor::from_name("light"), Sensor::Light);
        assert_eq!(Sensor::from_name("co2"), Sensor::Temperature);
        assert_eq!(Sensor::from_name(""), Sensor::Temperature);
    }

    #[test]
    fn sensor_names_round_trip() {
        for sensor in SENSORS {
            assert_eq!(Sensor::from_name(sensor.name()), sensor);
            assert!(!sensor.color().is_empty());
            assert!(!sensor.optimal_range().is_empty());
        }
    }

    #[test]
    fn range_lookup_by_label() {
        assert_eq!(TimeRange::from_label("Week").unwrap().hours, 168);
        assert_eq!(TimeRange::from_label("24h").unwrap(), DEFAULT_RANGE);
        assert!(TimeRange::from_label("fortnight").is_none());
    }

    #[test]
    fn reading_fields_deserialize_with_nulls_absent() {
        let raw: RawReading = serde_json::from_str(
            r#"{"timestamp": "2024-05-11 10:30:00", "air_temperature": 22.0, "light_percent": null}"#,
        )
        .unwrap();
        assert_eq!(raw.air_temperature, Some(22.0));
        assert_eq!(raw.light_percent, None);
        assert_eq!(raw.soil_moisture_raw, None);
    }
}
