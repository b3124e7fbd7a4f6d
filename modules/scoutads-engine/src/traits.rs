//! Core traits for the event engine.

use anyhow::Result;

use crate::persist::StoredEvent;

/// Events carry a type string and know how to serialize for the event log.
pub trait EventLike: Clone + Send + Sync + 'static {
    /// Stable, namespaced type string, e.g. `"search:requested"`.
    fn event_type_str(&self) -> String;

    /// JSON payload recorded in the event log.
    fn to_persist_payload(&self) -> serde_json::Value;
}

/// Pure state updates. No I/O, no side effects.
pub trait Reducer<E: EventLike, S>: Send + Sync {
    fn reduce(&self, state: &mut S, event: &E);
}

/// Records events and returns them with sequence numbers.
///
/// Also implemented for `Arc<P>` so a sink can be shared for assertions.
pub trait EventPersister: Send + Sync {
    fn persist(
        &self,
        event_type: String,
        payload: serde_json::Value,
        run_id: &str,
    ) -> Result<StoredEvent>;
}
