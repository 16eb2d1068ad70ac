//! Read Dispatcher - answers point-in-time reads from the cached state.
//!
//! Every read takes one snapshot from the [`StateStore`] and picks the
//! requested field out of it. Reads never fetch and never wait on the
//! refresh task; before the first refresh they return the initial state.

use std::sync::Arc;

use super::error::ReadError;
use super::state::{ResourceId, ResourceValue};
use super::store::StateStore;

/// Serves resource reads for the location object.
#[derive(Debug, Clone)]
pub struct ReadDispatcher {
    store: Arc<StateStore>,
}

impl ReadDispatcher {
    /// Create a dispatcher reading from `store`.
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Read a single resource by its numeric identifier.
    ///
    /// Identifiers outside [`ResourceId::ALL`] yield
    /// [`ReadError::Unsupported`].
    pub fn read_resource(&self, id: u16) -> Result<ResourceValue, ReadError> {
        tracing::info!(resource_id = id, "Read on Location Resource");

        let resource = ResourceId::try_from(id).map_err(ReadError::Unsupported)?;
        Ok(self.read(resource))
    }

    /// Read a supported resource.
    pub fn read(&self, resource: ResourceId) -> ResourceValue {
        let state = self.store.read();
        match resource {
            ResourceId::Latitude => ResourceValue::Float(state.latitude),
            ResourceId::Longitude => ResourceValue::Float(state.longitude),
            ResourceId::Timestamp => ResourceValue::Time(state.timestamp),
        }
    }

    /// Identifiers this object serves.
    pub fn available_resource_ids(&self) -> &'static [ResourceId] {
        &ResourceId::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::state::ResourceState;
    use chrono::{TimeZone, Utc};

    fn create_dispatcher() -> (ReadDispatcher, Arc<StateStore>) {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let store = Arc::new(StateStore::new(ResourceState::initial(48.8, 2.3, t0)));
        (ReadDispatcher::new(Arc::clone(&store)), store)
    }

    #[test]
    fn test_read_supported_resources() {
        let (dispatcher, store) = create_dispatcher();
        let state = store.read();

        assert_eq!(dispatcher.read_resource(0), Ok(ResourceValue::Float(48.8)));
        assert_eq!(dispatcher.read_resource(1), Ok(ResourceValue::Float(2.3)));
        assert_eq!(
            dispatcher.read_resource(5),
            Ok(ResourceValue::Time(state.timestamp))
        );
    }

    #[test]
    fn test_read_unsupported_resource() {
        let (dispatcher, store) = create_dispatcher();
        let before = store.read();

        assert_eq!(dispatcher.read_resource(99), Err(ReadError::Unsupported(99)));
        assert_eq!(dispatcher.read_resource(2), Err(ReadError::Unsupported(2)));

        // Unsupported reads leave the state alone
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_read_reflects_latest_commit() {
        let (dispatcher, store) = create_dispatcher();
        let t1 = Utc.timestamp_opt(1_700_000_060, 0).unwrap();

        store.commit(53.63, 9.99, t1);

        assert_eq!(dispatcher.read(ResourceId::Latitude), ResourceValue::Float(53.63));
        assert_eq!(dispatcher.read(ResourceId::Longitude), ResourceValue::Float(9.99));
        assert_eq!(dispatcher.read(ResourceId::Timestamp), ResourceValue::Time(t1));
    }

    #[test]
    fn test_available_resource_ids() {
        let (dispatcher, _store) = create_dispatcher();
        let ids: Vec<u16> = dispatcher
            .available_resource_ids()
            .iter()
            .map(|r| r.id())
            .collect();

        assert_eq!(ids, vec![0, 1, 5]);
    }
}
