//! Runs searches off the caller's task and reports back over a channel.
//!
//! At most one search is in flight. Starting a new one aborts the previous
//! task; any outcome that still slips through carries an old seq and is
//! dropped by the reducer. A search task that panics is reported as a
//! failure so callers waiting on it always get an outcome.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use scoutads_common::{Result, SearchFilters, SearchResponse};
use scoutads_query::{filter_creatives, sort_creatives};
use scoutads_store::CreativeSource;

use crate::events::DashboardEvent;

/// Fetch, filter and sort. `search_time_ms` is left at zero for the caller.
pub async fn run_search(
    source: &dyn CreativeSource,
    filters: &SearchFilters,
) -> Result<SearchResponse> {
    let all = source.fetch_all().await?;
    let matched = filter_creatives(&all, filters);
    let items = sort_creatives(&matched, filters.sort_by, filters.sort_order);
    Ok(SearchResponse {
        total: items.len(),
        items,
        filters_applied: filters.clone(),
        search_time_ms: 0,
    })
}

pub struct SearchOrchestrator {
    source: Arc<dyn CreativeSource>,
    latency: Duration,
    next_seq: u64,
    in_flight: Option<(u64, AbortHandle)>,
    tx: mpsc::UnboundedSender<DashboardEvent>,
}

impl SearchOrchestrator {
    pub fn new(
        source: Arc<dyn CreativeSource>,
        latency: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<DashboardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let orchestrator = Self {
            source,
            latency,
            next_seq: 0,
            in_flight: None,
            tx,
        };
        (orchestrator, rx)
    }

    /// Allocate the seq for the next search. Strictly increasing from 1.
    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Spawn the search for `seq`, aborting whatever was running.
    pub fn start(&mut self, seq: u64, filters: SearchFilters) {
        if let Some((old_seq, handle)) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!(old_seq, new_seq = seq, "Superseding in-flight search");
                handle.abort();
            }
        }

        let source = self.source.clone();
        let latency = self.latency;
        let tx = self.tx.clone();

        let search = tokio::spawn(async move {
            let started = Instant::now();
            tokio::time::sleep(latency).await;

            match run_search(source.as_ref(), &filters).await {
                Ok(mut response) => {
                    response.search_time_ms = started.elapsed().as_millis() as u64;
                    DashboardEvent::SearchCompleted { seq, response }
                }
                Err(e) => {
                    warn!(seq, error = %e, "Search failed");
                    DashboardEvent::SearchFailed {
                        seq,
                        message: e.to_string(),
                    }
                }
            }
        });
        let abort = search.abort_handle();

        tokio::spawn(async move {
            let event = match search.await {
                Ok(event) => event,
                Err(e) if e.is_panic() => {
                    warn!(seq, "Search task panicked");
                    DashboardEvent::SearchFailed {
                        seq,
                        message: "search task panicked".to_string(),
                    }
                }
                // Aborted: superseded or cancelled, nothing to report.
                Err(_) => return,
            };
            // Receiver gone means the dashboard was dropped.
            let _ = tx.send(event);
        });

        self.in_flight = Some((seq, abort));
    }

    /// Abort the in-flight search. Returns its seq if one was still running.
    pub fn cancel(&mut self) -> Option<u64> {
        let (seq, handle) = self.in_flight.take()?;
        if handle.is_finished() {
            return None;
        }
        handle.abort();
        Some(seq)
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(seq, _)| *seq)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn source(&self) -> &Arc<dyn CreativeSource> {
        &self.source
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}
