//! Alert change detection.
//!
//! The alert feed is polled independently of readings; a notification
//! should fire once per distinct alert set, not once per poll. Change
//! detection runs over an explicit signature owned by the caller, which
//! persists it between polls and feeds it back in.

use crate::domain::AlertEvent;

/// Result of reconciling the current alert set against the last announced
/// signature.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertOutcome {
    /// Signature to persist for the next poll.
    pub signature: String,
    pub should_notify: bool,
    /// First alert's message, present only when a notification should fire.
    pub primary_message: Option<String>,
}

/// Decide whether the alert set changed since the last announcement.
///
/// The signature is the comma-joined alert types in feed order; order
/// matters, so a reordered set counts as a change. An empty set always
/// resets the signature and never notifies.
pub fn reconcile(previous_signature: &str, alerts: &[AlertEvent]) -> AlertOutcome {
    if alerts.is_empty() {
        return AlertOutcome {
            signature: String::new(),
            should_notify: false,
            primary_message: None,
        };
    }

    let signature = alerts
        .iter()
        .map(|alert| alert.kind.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let should_notify = signature != previous_signature;
    let primary_message = should_notify.then(|| alerts[0].message.clone());

    AlertOutcome {
        signature,
        should_notify,
        primary_message,
    }
}
