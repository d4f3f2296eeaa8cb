//! Text rendering of the home and history screens.
//!
//! This is the "render some output" collaborator: it turns state into plain
//! text and makes no decisions about the data itself. Rounding for display
//! happens here, never in the computation modules.

use crate::chart::{self, ChartSeries};
use crate::config::AppConfig;
use crate::domain::{Reading, Sensor, RANGES, SENSORS};
use crate::state::{AppState, HistoryStatus};
use crate::stats;
use chrono::Local;
use std::fmt::Write;

// Classification bands from the home screen. The moisture threshold comes
// from config instead.
const LIGHT_GREAT: f64 = 70.0;
const LIGHT_GOOD: f64 = 30.0;
const TEMP_HIGH: f64 = 28.0;
const TEMP_LOW: f64 = 18.0;
const HUMIDITY_HIGH: f64 = 70.0;
const HUMIDITY_LOW: f64 = 30.0;

/// `"23.5°C"`, `"45%"`, `"512"`; `--` when the value is missing.
pub fn format_value(value: Option<f64>, unit: &str, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}{unit}"),
        None => "--".to_string(),
    }
}

/// Qualitative status for a sensor value; `--` when unknown. Soil
/// temperature has no status row.
pub fn status_text(sensor: Sensor, value: Option<f64>, moisture_wet_threshold: f64) -> &'static str {
    let Some(v) = value else { return "--" };
    match sensor {
        Sensor::Light => {
            if v > LIGHT_GREAT {
                "Great"
            } else if v > LIGHT_GOOD {
                "Good"
            } else {
                "Bad"
            }
        }
        Sensor::Temperature => {
            if v > TEMP_HIGH {
                "High"
            } else if v < TEMP_LOW {
                "Low"
            } else {
                "Good"
            }
        }
        Sensor::Humidity => {
            if v > HUMIDITY_HIGH {
                "High"
            } else if v < HUMIDITY_LOW {
                "Low"
            } else {
                "Good"
            }
        }
        Sensor::Moisture => {
            if v > moisture_wet_threshold {
                "Wet"
            } else {
                "Dry"
            }
        }
        Sensor::SoilTemp => "",
    }
}

/// The one-line notification a changed alert set produces.
pub fn notification_line(message: &str) -> String {
    format!("🌱 Plant Alert: {message}")
}

/// The home screen: alert banner, sensor cards, last-reading footer.
pub fn render_home(state: &AppState, config: &AppConfig) -> String {
    if state.connecting {
        return "Connecting to plant monitor...\n".to_string();
    }
    let moisture_wet_threshold = config.thresholds.soil_moisture_wet;

    let mut out = String::new();
    if !state.alerts.is_empty() {
        out.push_str("⚠ Attention Needed\n");
        for alert in &state.alerts {
            let _ = writeln!(out, "  • {}", alert.message);
        }
    }
    let _ = writeln!(out, "{}", config.plant.name);

    let latest = state.latest.as_ref();
    for sensor in [
        Sensor::Light,
        Sensor::Temperature,
        Sensor::Humidity,
        Sensor::Moisture,
    ] {
        let value = latest.and_then(|reading| sensor.value(reading));
        let _ = writeln!(
            out,
            "{:<16} {:>8}  {}",
            sensor.title(),
            format_value(value, sensor.unit(), sensor.decimals()),
            status_text(sensor, value, moisture_wet_threshold),
        );
    }

    // Soil temperature is a plain row, shown only when sampled.
    if let Some(value) = latest.and_then(|reading| Sensor::SoilTemp.value(reading)) {
        let _ = writeln!(
            out,
            "{:<16} {:>8}",
            Sensor::SoilTemp.title(),
            format_value(Some(value), Sensor::SoilTemp.unit(), 1),
        );
    }

    let _ = writeln!(out, "Last reading: {}", last_reading_text(latest));
    out
}

fn last_reading_text(latest: Option<&Reading>) -> String {
    match latest {
        Some(reading) => reading
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "never".to_string(),
    }
}

/// The history screen for the selected sensor and range.
pub fn render_history(state: &AppState) -> String {
    let sensor = state.selected_sensor;
    let range = state.store.selected_range();

    let mut out = String::new();
    let _ = writeln!(out, "{} History", sensor.title());
    let row = RANGES
        .iter()
        .map(|r| {
            if *r == range {
                format!("[{}]", r.label)
            } else {
                r.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "Range: {row}");

    match &state.history_status {
        HistoryStatus::Loading => {
            out.push_str("Loading history...\n");
            return out;
        }
        HistoryStatus::Failed(message) => {
            let _ = writeln!(out, "{message}");
            return out;
        }
        HistoryStatus::Ready => {}
    }

    match chart::sample(state.store.window(), sensor, range) {
        Some(series) => {
            out.push_str(&render_series(&series, sensor));
            let _ = writeln!(out, "🌿 Optimal range: {}", sensor.optimal_range());
        }
        None => out.push_str("No data available for this range\n"),
    }

    match stats::stats(state.store.window(), sensor) {
        Some(s) => {
            out.push_str("Summary\n");
            let _ = writeln!(out, "  Min: {:.1}{}", s.min, sensor.unit());
            let _ = writeln!(out, "  Max: {:.1}{}", s.max, sensor.unit());
            let _ = writeln!(out, "  Avg: {:.1}{}", s.avg, sensor.unit());
        }
        None => out.push_str("No data in this range\n"),
    }
    out
}

fn render_series(series: &ChartSeries, sensor: Sensor) -> String {
    let mut out = String::new();
    for (label, value) in series.labels.iter().zip(&series.values) {
        let _ = writeln!(out, "  {label:>8} │ {value:>8.1}{}", sensor.unit());
    }
    out
}

/// One-line list of the sensors a `sensor <name>` command accepts.
pub fn sensor_names() -> String {
    SENSORS
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}
