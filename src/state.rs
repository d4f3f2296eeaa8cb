//! Shared application state and fetch-result transitions.
//!
//! The poll tasks and the command loop share one [`AppState`] behind
//! `Arc<RwLock<_>>`. Every fetch result is applied in a single transition
//! under the write lock, so views never observe a partially applied
//! payload.

use crate::alerts;
use crate::api::FetchError;
use crate::domain::{AlertEvent, RawReading, Reading, Sensor, TimeRange};
use crate::store::ReadingStore;
use chrono::{DateTime, Utc};
use log::{debug, warn};

/// History load state. On failure the previously fetched data is retained
/// in memory but the view shows the error instead of chart and stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStatus {
    /// First fetch has not settled yet.
    Loading,
    Ready,
    Failed(&'static str),
}

#[derive(Debug)]
pub struct AppState {
    /// Most recent reading shown on the home screen; survives failed polls.
    pub latest: Option<Reading>,
    /// True until the first `/api/latest` poll settles.
    pub connecting: bool,
    /// Current alert set for the banner.
    pub alerts: Vec<AlertEvent>,
    /// Last announced alert signature, threaded through
    /// [`alerts::reconcile`] on every poll.
    pub alert_signature: String,
    /// Raw history and its derived window.
    pub store: ReadingStore,
    pub history_status: HistoryStatus,
    /// Sensor whose history is being inspected.
    pub selected_sensor: Sensor,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            latest: None,
            connecting: true,
            alerts: Vec::new(),
            alert_signature: String::new(),
            store: ReadingStore::new(),
            history_status: HistoryStatus::Loading,
            selected_sensor: Sensor::Temperature,
        }
    }

    /// Apply a `/api/history` poll result.
    ///
    /// On success the raw collection is replaced wholesale; readings with
    /// unparsable timestamps are dropped individually rather than failing
    /// the payload.
    pub fn apply_history(
        &mut self,
        result: Result<Vec<RawReading>, FetchError>,
        now: DateTime<Utc>,
    ) {
        match result {
            Ok(raw) => {
                let total = raw.len();
                let readings: Vec<Reading> =
                    raw.into_iter().filter_map(RawReading::into_reading).collect();
                let dropped = total - readings.len();
                if dropped > 0 {
                    debug!("dropped {dropped} history readings with unparsable timestamps");
                }
                self.store.replace(readings, now);
                debug!(
                    "history replaced: {} readings, {} in window",
                    self.store.raw().len(),
                    self.store.window().len(),
                );
                self.history_status = HistoryStatus::Ready;
            }
            Err(e) => {
                warn!("history fetch failed: {e}");
                self.history_status = HistoryStatus::Failed(e.user_message());
            }
        }
    }

    /// Apply a `/api/latest` poll result. Failures and "no data" responses
    /// keep the previous snapshot.
    pub fn apply_latest(&mut self, result: Result<Option<RawReading>, FetchError>) {
        match result {
            Ok(Some(raw)) => match raw.into_reading() {
                Some(reading) => self.latest = Some(reading),
                None => debug!("latest reading has an unparsable timestamp, keeping previous"),
            },
            Ok(None) => debug!("monitor has no latest reading yet"),
            Err(e) => warn!("latest fetch failed: {e}"),
        }
        self.connecting = false;
    }

    /// Apply a `/api/check-alerts` poll result and return the message to
    /// announce when the alert set changed. A failed poll leaves the alert
    /// state untouched until the next successful one.
    pub fn apply_alerts(&mut self, result: Result<Vec<AlertEvent>, FetchError>) -> Option<String> {
        match result {
            Ok(current) => {
                let outcome = alerts::reconcile(&self.alert_signature, &current);
                self.alert_signature = outcome.signature;
                self.alerts = current;
                if outcome.should_notify {
                    outcome.primary_message
                } else {
                    None
                }
            }
            Err(e) => {
                warn!("alert poll failed: {e}");
                None
            }
        }
    }

    /// Select a history range and rebuild the window.
    pub fn select_range(&mut self, range: TimeRange, now: DateTime<Utc>) {
        self.store.select_range(range, now);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
