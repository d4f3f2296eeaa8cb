//! Summary statistics over a windowed subset.

use crate::domain::{Reading, Sensor};

/// Min/max/mean of one sensor's values. Unrounded; the view layer rounds
/// for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Statistics for `sensor` over the window, skipping readings where the
/// field is missing. `None` when no reading carries a value.
pub fn stats(windowed: &[Reading], sensor: Sensor) -> Option<Stats> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for value in windowed.iter().filter_map(|r| sensor.value(r)) {
        min = min.min(value);
        max = max.max(value);
        sum += value;
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some(Stats {
        min,
        max,
        avg: sum / count as f64,
    })
}
