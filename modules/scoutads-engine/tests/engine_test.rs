//! Engine dispatch against the in-memory sink.

use std::sync::Arc;

use anyhow::{bail, Result};
use scoutads_engine::{Engine, EventLike, EventPersister, MemoryEventSink, Reducer, StoredEvent};
use serde::Serialize;

// ---------------------------------------------------------------------------
// A tiny tally domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TallyEvent {
    Added { amount: u32 },
    Cleared,
}

impl EventLike for TallyEvent {
    fn event_type_str(&self) -> String {
        match self {
            TallyEvent::Added { .. } => "tally:added",
            TallyEvent::Cleared => "tally:cleared",
        }
        .to_string()
    }

    fn to_persist_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("TallyEvent serialization should never fail")
    }
}

#[derive(Debug, Default)]
struct Tally {
    total: u32,
    history: Vec<u32>,
}

struct TallyReducer;

impl Reducer<TallyEvent, Tally> for TallyReducer {
    fn reduce(&self, state: &mut Tally, event: &TallyEvent) {
        match event {
            TallyEvent::Added { amount } => {
                state.total += amount;
                state.history.push(*amount);
            }
            TallyEvent::Cleared => {
                state.total = 0;
                state.history.clear();
            }
        }
    }
}

/// Refuses every event, like a full disk.
struct RejectingSink;

impl EventPersister for RejectingSink {
    fn persist(&self, _: String, _: serde_json::Value, _: &str) -> Result<StoredEvent> {
        bail!("sink rejected event")
    }
}

fn tally_engine(sink: Arc<MemoryEventSink>) -> Engine<TallyEvent, Tally, TallyReducer, Arc<MemoryEventSink>> {
    Engine::new(TallyReducer, sink, "run-7".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn events_fold_into_state_in_dispatch_order() {
    let engine = tally_engine(Arc::new(MemoryEventSink::new()));
    let mut tally = Tally::default();

    for event in [
        TallyEvent::Added { amount: 2 },
        TallyEvent::Added { amount: 5 },
        TallyEvent::Cleared,
        TallyEvent::Added { amount: 3 },
    ] {
        engine.dispatch(event, &mut tally).unwrap();
    }

    assert_eq!(tally.total, 3);
    assert_eq!(tally.history, vec![3]);
}

#[test]
fn log_records_type_payload_and_run() {
    let sink = Arc::new(MemoryEventSink::new());
    let engine = tally_engine(sink.clone());
    let mut tally = Tally::default();

    let first = engine.dispatch(TallyEvent::Added { amount: 4 }, &mut tally).unwrap();
    let second = engine.dispatch(TallyEvent::Cleared, &mut tally).unwrap();

    assert_eq!((first.seq, second.seq), (1, 2));
    assert_eq!(sink.event_types(), vec!["tally:added", "tally:cleared"]);

    let logged = sink.events();
    assert_eq!(logged[0].payload["type"], "added");
    assert_eq!(logged[0].payload["amount"], 4);
    assert!(logged.iter().all(|e| e.run_id.as_deref() == Some("run-7")));
    assert_eq!(engine.run_id(), "run-7");
}

#[test]
fn bounded_log_drops_oldest_but_state_sees_all() {
    let sink = Arc::new(MemoryEventSink::bounded(2));
    let engine = tally_engine(sink.clone());
    let mut tally = Tally::default();

    for amount in 1..=4 {
        engine.dispatch(TallyEvent::Added { amount }, &mut tally).unwrap();
    }

    let seqs: Vec<i64> = sink.events().iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![3, 4]);
    assert_eq!(tally.total, 10);
}

#[test]
fn rejected_event_leaves_state_untouched() {
    let engine: Engine<TallyEvent, Tally, TallyReducer, RejectingSink> =
        Engine::new(TallyReducer, RejectingSink, "run-8".to_string());
    let mut tally = Tally::default();

    assert!(engine.dispatch(TallyEvent::Added { amount: 9 }, &mut tally).is_err());
    assert_eq!(tally.total, 0);
}
