//! Event dispatch engine.
//!
//! Provides a synchronous update cycle: persist → reduce. Every state change
//! goes through a dispatched event, so the event log is a complete history
//! of how the state got where it is.
//!
//! Consumers define their domain by implementing `EventLike` (what happened)
//! and `Reducer` (pure state updates).

pub mod engine;
pub mod persist;
pub mod traits;

pub use engine::Engine;
pub use persist::{MemoryEventSink, StoredEvent};
pub use traits::{EventLike, EventPersister, Reducer};
