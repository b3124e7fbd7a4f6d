//! The dispatch loop.

use std::marker::PhantomData;

use anyhow::Result;
use tracing::trace;

use crate::persist::StoredEvent;
use crate::traits::{EventLike, EventPersister, Reducer};

/// Generic event dispatch engine: persist, then reduce.
pub struct Engine<E, S, Red, P>
where
    E: EventLike,
    Red: Reducer<E, S>,
    P: EventPersister,
{
    reducer: Red,
    persister: P,
    run_id: String,
    _phantom: PhantomData<fn() -> (E, S)>,
}

impl<E, S, Red, P> Engine<E, S, Red, P>
where
    E: EventLike,
    Red: Reducer<E, S>,
    P: EventPersister,
{
    pub fn new(reducer: Red, persister: P, run_id: String) -> Self {
        Self {
            reducer,
            persister,
            run_id,
            _phantom: PhantomData,
        }
    }

    /// Dispatch an event: record it, then fold it into `state`.
    ///
    /// The state is only reduced once the event has been recorded.
    pub fn dispatch(&self, event: E, state: &mut S) -> Result<StoredEvent> {
        let stored = self.persister.persist(
            event.event_type_str(),
            event.to_persist_payload(),
            &self.run_id,
        )?;
        trace!(seq = stored.seq, event_type = %stored.event_type, "Dispatching event");

        self.reducer.reduce(state, &event);
        Ok(stored)
    }

    /// Read-only access to the run ID.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn persister(&self) -> &P {
        &self.persister
    }
}
