//! Raw reading history and its derived window.

use crate::domain::{Reading, TimeRange, DEFAULT_RANGE};
use crate::filter::filter_by_range;
use chrono::{DateTime, Utc};

/// Holds the raw reading collection and the windowed subset derived from it.
///
/// The raw collection is replaced wholesale on every successful fetch (never
/// merged) and kept sorted most-recent-first; the window is recomputed
/// whenever the raw data or the selected range changes.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    raw: Vec<Reading>,
    window: Vec<Reading>,
    selected: TimeRange,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            window: Vec::new(),
            selected: DEFAULT_RANGE,
        }
    }

    /// Replace the raw collection with a fresh fetch result.
    pub fn replace(&mut self, mut readings: Vec<Reading>, now: DateTime<Utc>) {
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.raw = readings;
        self.recompute(now);
    }

    /// Change the selected range and rebuild the window.
    pub fn select_range(&mut self, range: TimeRange, now: DateTime<Utc>) {
        self.selected = range;
        self.recompute(now);
    }

    pub fn selected_range(&self) -> TimeRange {
        self.selected
    }

    pub fn raw(&self) -> &[Reading] {
        &self.raw
    }

    /// The windowed subset, most-recent-first.
    pub fn window(&self) -> &[Reading] {
        &self.window
    }

    fn recompute(&mut self, now: DateTime<Utc>) {
        self.window = filter_by_range(&self.raw, self.selected, now);
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}
