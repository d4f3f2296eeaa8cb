//! Runtime configuration loader.
//!
//! Defines the schema for `plantwatch.toml` and loads it with defaults for
//! anything missing. The monitor address, poll intervals, history fetch
//! depth and the soil moisture threshold all live here rather than as
//! compiled-in constants.

use anyhow::Context;
use log::info;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub plant: PlantConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Base address of the monitor API, no trailing slash.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlantConfig {
    /// Display name on the home screen.
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    pub reading_interval_seconds: u64,
    pub alert_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Depth of every history fetch; windowing happens client side.
    pub fetch_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThresholdConfig {
    /// Raw soil moisture above this counts as "Wet".
    pub soil_moisture_wet: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Print the home view after every reading poll.
    pub show_sensor_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.1.104:5000".to_string(),
        }
    }
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            name: "Monstera Deliciosa".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            reading_interval_seconds: 10,
            alert_interval_seconds: 10,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { fetch_hours: 720 }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            soil_moisture_wet: 500.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_sensor_data: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read {}", path.as_ref().display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.as_ref().display()))
    }

    /// Load with default fallback. Reports on stderr; the logger is not up
    /// yet because its level comes from the loaded config.
    pub fn load_or_default() -> Self {
        let paths = [
            std::path::PathBuf::from("plantwatch.toml"),
            std::path::PathBuf::from("config").join("plantwatch.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("skipping {}: {e:#}", path.display()),
                }
            }
        }

        eprintln!("no config file found, using defaults");
        Self::default()
    }

    /// Log a configuration summary at startup.
    pub fn log_summary(&self) {
        info!("monitor: {} ({})", self.server.base_url, self.plant.name);
        info!(
            "polling: readings every {}s, alerts every {}s, history depth {}h",
            self.polling.reading_interval_seconds,
            self.polling.alert_interval_seconds,
            self.history.fetch_hours,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployed_monitor() {
        let config = AppConfig::default();
        assert_eq!(config.server.base_url, "http://192.168.1.104:5000");
        assert_eq!(config.plant.name, "Monstera Deliciosa");
        assert_eq!(config.polling.reading_interval_seconds, 10);
        assert_eq!(config.polling.alert_interval_seconds, 10);
        assert_eq!(config.history.fetch_hours, 720);
        assert_eq!(config.thresholds.soil_moisture_wet, 500.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            base_url = "http://plant.local:5000"

            [thresholds]
            soil_moisture_wet = 620.0
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://plant.local:5000");
        assert_eq!(config.thresholds.soil_moisture_wet, 620.0);
        assert_eq!(config.polling.reading_interval_seconds, 10);
        assert_eq!(config.history.fetch_hours, 720);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.history.fetch_hours, 720);
        assert!(config.logging.show_sensor_data);
    }
}
