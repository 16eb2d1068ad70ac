//! Change Notifier - diff, conditional commit and broadcast.
//!
//! The decision itself is [`detect_change`], a pure function of the
//! previous state and a candidate reading. [`ChangeNotifier`] wraps it with
//! the side effects: commit to the [`StateStore`] and broadcast the
//! resulting [`ChangeEvent`] to subscribers.
//!
//! # Comparison rule
//!
//! Latitude and longitude are compared independently, each against its own
//! stored value, using exact inequality. The timestamp is never compared:
//! it is reported as changed whenever a coordinate is, and only then.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::state::{ChangeEvent, PositionSnapshot, ResourceState};
use super::store::StateStore;

/// Decide which resources a candidate reading would change.
///
/// Returns `None` when both coordinates are bit-for-bit equal to the
/// stored ones, in which case nothing should be committed.
pub fn detect_change(previous: &ResourceState, candidate: &PositionSnapshot) -> Option<ChangeEvent> {
    let latitude_changed = candidate.latitude != previous.latitude;
    let longitude_changed = candidate.longitude != previous.longitude;

    ChangeEvent::from_changed(latitude_changed, longitude_changed)
}

/// Applies candidate readings to the store and signals observers.
///
/// Only the refresh scheduler holds a notifier, which keeps it the single
/// writer of the store.
pub struct ChangeNotifier {
    /// Store being updated.
    store: Arc<StateStore>,

    /// Broadcast channel for change events.
    events_tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Create a notifier writing to `store` and publishing on `events_tx`.
    pub fn new(store: Arc<StateStore>, events_tx: broadcast::Sender<ChangeEvent>) -> Self {
        Self { store, events_tx }
    }

    /// Get the currently committed state.
    pub fn current(&self) -> ResourceState {
        self.store.read()
    }

    /// Apply a candidate reading.
    ///
    /// On change, commits the candidate coordinates stamped with
    /// `candidate.observed_at` and broadcasts the event. Returns the event
    /// that was published, if any.
    pub fn apply(&self, candidate: &PositionSnapshot) -> Option<ChangeEvent> {
        let previous = self.store.read();

        let Some(event) = detect_change(&previous, candidate) else {
            tracing::trace!(
                latitude = candidate.latitude,
                longitude = candidate.longitude,
                "Location unchanged, nothing to commit"
            );
            return None;
        };

        self.store.commit(
            candidate.latitude,
            candidate.longitude,
            candidate.observed_at,
        );

        tracing::debug!(
            latitude = candidate.latitude,
            longitude = candidate.longitude,
            timestamp = %candidate.observed_at.to_rfc3339(),
            changed = %event,
            "Location committed"
        );

        // No subscribers is fine; the state is still committed.
        let _ = self.events_tx.send(event.clone());

        Some(event)
    }
}
