//! Resource state store.
//!
//! A single-writer / multi-reader cell holding the cached [`ResourceState`].
//! Every read returns a whole copy taken under the lock, and every commit
//! replaces latitude, longitude and timestamp together, so readers never
//! see a coordinate from one commit paired with the timestamp of another.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::state::ResourceState;

/// Thread-safe holder of the cached resource state.
#[derive(Debug)]
pub struct StateStore {
    state: RwLock<ResourceState>,
}

impl StateStore {
    /// Create a store seeded with the initial state.
    pub fn new(initial: ResourceState) -> Self {
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Get a consistent copy of the current state.
    pub fn read(&self) -> ResourceState {
        *self.state.read()
    }

    /// Replace the coordinates and timestamp in one step.
    ///
    /// `scale_factor` is left as is.
    pub fn commit(&self, latitude: f64, longitude: f64, timestamp: DateTime<Utc>) {
        let mut state = self.state.write();
        state.latitude = latitude;
        state.longitude = longitude;
        state.timestamp = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    #[test]
    fn test_read_returns_initial_state() {
        let initial = ResourceState::initial(1.0, 2.0, t(0));
        let store = StateStore::new(initial);

        assert_eq!(store.read(), initial);
    }

    #[test]
    fn test_commit_replaces_all_three_fields() {
        let store = StateStore::new(ResourceState::initial(0.0, 0.0, t(0)));

        store.commit(48.8, 2.3, t(2));

        let state = store.read();
        assert_eq!(state.latitude, 48.8);
        assert_eq!(state.longitude, 2.3);
        assert_eq!(state.timestamp, t(2));
    }

    #[test]
    fn test_commit_preserves_scale_factor() {
        let mut initial = ResourceState::initial(0.0, 0.0, t(0));
        initial.scale_factor = 2.5;
        let store = StateStore::new(initial);

        store.commit(10.0, 20.0, t(1));

        assert_eq!(store.read().scale_factor, 2.5);
    }

    #[test]
    fn test_concurrent_reads_never_observe_torn_state() {
        // Every commit writes lat == lon == i and timestamp t(i), so any
        // mix of two commits is detectable from a single read.
        let store = Arc::new(StateStore::new(ResourceState::initial(0.0, 0.0, t(0))));
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let done = Arc::clone(&done);
                std::thread::spawn(move || {
                    let mut reads = 0u64;
                    while !done.load(Ordering::Acquire) {
                        let state = store.read();
                        assert_eq!(state.latitude, state.longitude);
                        assert_eq!(state.timestamp, t(state.latitude as i64));
                        reads += 1;
                    }
                    reads
                })
            })
            .collect();

        for i in 1..=5_000i64 {
            store.commit(i as f64, i as f64, t(i));
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.join().expect("reader thread panicked");
        }

        let last = store.read();
        assert_eq!(last.position(), (5_000.0, 5_000.0));
        assert_eq!(last.timestamp, t(5_000));
    }
}
