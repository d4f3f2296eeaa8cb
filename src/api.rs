//! Fetch layer for the plant monitor HTTP API.
//!
//! Three GET endpoints: `/api/history`, `/api/latest`, `/api/check-alerts`.
//! Bodies are fetched as text and parsed separately, so "server unreachable"
//! and "server answered nonsense" stay distinguishable. Both are recoverable;
//! poll tasks log them and wait for the next cycle.

use crate::domain::{AlertEvent, RawReading};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Fetch-layer failure taxonomy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network unreachable, timeout, or non-2xx status.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response parsed but is not the expected shape.
    #[error("invalid response format: {0}")]
    Format(#[from] serde_json::Error),
}

impl FetchError {
    /// Inline message the history view shows for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "Failed to load history",
            FetchError::Format(_) => "Invalid data format",
        }
    }
}

/// `/api/latest` body: either a reading or an error object meaning the
/// monitor has no data yet.
#[derive(Deserialize)]
#[serde(untagged)]
enum LatestBody {
    Error { error: String },
    Reading(RawReading),
}

#[derive(Deserialize)]
struct AlertsBody {
    alert_count: usize,
    #[serde(default)]
    alerts: Vec<AlertEvent>,
}

/// HTTP client for the monitor endpoints. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_text(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// `GET /api/history?hours=<n>`: the reading history, unfiltered;
    /// windowing happens client side.
    pub async fn history(&self, hours: i64) -> Result<Vec<RawReading>, FetchError> {
        let body = self.get_text(&format!("/api/history?hours={hours}")).await?;
        parse_history(&body)
    }

    /// `GET /api/latest`: the most recent reading, or `None` when the
    /// monitor reports it has nothing yet.
    pub async fn latest(&self) -> Result<Option<RawReading>, FetchError> {
        let body = self.get_text("/api/latest").await?;
        parse_latest(&body)
    }

    /// `GET /api/check-alerts`: the current alert set, empty when the
    /// reported count is zero.
    pub async fn check_alerts(&self) -> Result<Vec<AlertEvent>, FetchError> {
        let body = self.get_text("/api/check-alerts").await?;
        parse_alerts(&body)
    }
}

fn parse_history(body: &str) -> Result<Vec<RawReading>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

fn parse_latest(body: &str) -> Result<Option<RawReading>, FetchError> {
    match serde_json::from_str::<LatestBody>(body)? {
        LatestBody::Error { error } => {
            debug!("monitor reports no data: {error}");
            Ok(None)
        }
        LatestBody::Reading(raw) => Ok(Some(raw)),
    }
}

fn parse_alerts(body: &str) -> Result<Vec<AlertEvent>, FetchError> {
    let parsed: AlertsBody = serde_json::from_str(body)?;
    if parsed.alert_count > 0 {
        Ok(parsed.alerts)
    } else {
        Ok(Vec::new())
    }
}
