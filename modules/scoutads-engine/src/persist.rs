//! EventPersister implementations.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::EventPersister;

/// An event as recorded in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub seq: i64,
    pub ts: DateTime<Utc>,
    pub event_type: String,
    pub run_id: Option<String>,
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// MemoryEventSink
// ---------------------------------------------------------------------------

/// In-memory event log with incrementing sequence numbers. Thread-safe.
pub struct MemoryEventSink {
    next_seq: AtomicI64,
    events: Mutex<Vec<StoredEvent>>,
    capacity: Option<usize>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self {
            next_seq: AtomicI64::new(1),
            events: Mutex::new(Vec::new()),
            capacity: None,
        }
    }

    /// Keep only the most recent `capacity` events. Sequence numbers keep counting.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Snapshot of the recorded events, oldest first.
    pub fn events(&self) -> Vec<StoredEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Recorded event type strings, oldest first.
    pub fn event_types(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.event_type).collect()
    }
}

impl Default for MemoryEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPersister for MemoryEventSink {
    fn persist(
        &self,
        event_type: String,
        payload: serde_json::Value,
        run_id: &str,
    ) -> Result<StoredEvent> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let stored = StoredEvent {
            seq,
            ts: Utc::now(),
            event_type,
            run_id: Some(run_id.to_string()),
            payload,
        };

        let mut events = self
            .events
            .lock()
            .map_err(|_| anyhow!("event sink lock poisoned"))?;
        events.push(stored.clone());
        if let Some(cap) = self.capacity {
            if events.len() > cap {
                let excess = events.len() - cap;
                events.drain(..excess);
            }
        }
        Ok(stored)
    }
}

// ---------------------------------------------------------------------------
// Arc<P> blanket, so tests can share the sink for assertions
// ---------------------------------------------------------------------------

impl<P: EventPersister + ?Sized> EventPersister for Arc<P> {
    fn persist(
        &self,
        event_type: String,
        payload: serde_json::Value,
        run_id: &str,
    ) -> Result<StoredEvent> {
        (**self).persist(event_type, payload, run_id)
    }
}
