//! The dashboard: state, event log, search orchestration and preferences.
//!
//! Every change goes through `dispatch`, which records the event and folds it
//! into `DashboardState`. Side effects (persisting preferences, spawning or
//! aborting searches) happen here, never in the reducer.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use scoutads_common::{
    AdvertiserCount, Config, CountryCount, Creative, QuickFilter, Result, ScoreBreakdown,
    ScoutAdsError, SearchFilters, SortField, SortOrder,
};
use scoutads_engine::{Engine, MemoryEventSink, StoredEvent};
use scoutads_query::score_breakdown;
use scoutads_store::{CreativeSource, KeyValueStore, Preferences, FILTERS_KEY, SAVED_KEY};

use crate::events::DashboardEvent;
use crate::orchestrator::SearchOrchestrator;
use crate::reducer::DashboardReducer;
use crate::state::DashboardState;

type DashboardEngine =
    Engine<DashboardEvent, DashboardState, DashboardReducer, Arc<MemoryEventSink>>;

pub struct Dashboard<K: KeyValueStore> {
    state: DashboardState,
    engine: DashboardEngine,
    sink: Arc<MemoryEventSink>,
    orchestrator: SearchOrchestrator,
    events_rx: mpsc::UnboundedReceiver<DashboardEvent>,
    prefs: Preferences<K>,
    top_n: usize,
}

impl<K: KeyValueStore> Dashboard<K> {
    /// Build a dashboard and restore persisted filters and saved creatives.
    /// Missing or corrupt preferences fall back to defaults.
    pub fn new(store: K, source: Arc<dyn CreativeSource>, config: &Config) -> Result<Self> {
        let sink = Arc::new(MemoryEventSink::new());
        let run_id = Uuid::new_v4().to_string();
        let engine = Engine::new(DashboardReducer, sink.clone(), run_id);
        let (orchestrator, events_rx) = SearchOrchestrator::new(source, config.latency());

        let mut dashboard = Self {
            state: DashboardState::default(),
            engine,
            sink,
            orchestrator,
            events_rx,
            prefs: Preferences::new(store),
            top_n: config.top_n,
        };

        let filters: SearchFilters = dashboard
            .prefs
            .load_or_default(FILTERS_KEY, SearchFilters::default());
        let saved: Vec<String> = dashboard.prefs.load_or_default(SAVED_KEY, Vec::new());
        dashboard.dispatch(DashboardEvent::PreferencesLoaded {
            filters: filters.normalized(),
            saved,
        })?;

        info!(run_id = dashboard.engine.run_id(), "Dashboard ready");
        Ok(dashboard)
    }

    fn dispatch(&mut self, event: DashboardEvent) -> Result<StoredEvent> {
        let stored = self.engine.dispatch(event, &mut self.state)?;
        Ok(stored)
    }

    // --- Filters ---

    pub fn set_filters(&mut self, filters: SearchFilters) -> Result<()> {
        self.dispatch(DashboardEvent::FiltersChanged {
            filters: filters.normalized(),
        })?;
        self.persist_filters();
        Ok(())
    }

    pub fn apply_quick_filter(&mut self, quick: QuickFilter) -> Result<()> {
        let filters = self.state.filters.clone().with_quick_filter(quick);
        self.set_filters(filters)
    }

    pub fn set_sort(&mut self, sort_by: SortField, sort_order: SortOrder) -> Result<()> {
        self.dispatch(DashboardEvent::SortChanged {
            sort_by,
            sort_order,
        })?;
        self.persist_filters();
        Ok(())
    }

    pub fn reset_filters(&mut self) -> Result<()> {
        self.dispatch(DashboardEvent::FiltersReset)?;
        self.persist_filters();
        Ok(())
    }

    fn persist_filters(&self) {
        self.prefs.save(FILTERS_KEY, &self.state.filters);
    }

    // --- Search ---

    /// Search with the current filters. Returns the search's seq.
    pub fn search(&mut self) -> Result<u64> {
        let filters = self.state.filters.clone();
        self.search_with(filters)
    }

    /// Replace the filters and search with them. A search still in flight
    /// is superseded.
    pub fn search_with(&mut self, filters: SearchFilters) -> Result<u64> {
        let filters = filters.normalized();
        let seq = self.orchestrator.next_seq();
        self.dispatch(DashboardEvent::SearchRequested {
            seq,
            filters: filters.clone(),
        })?;
        self.persist_filters();
        self.orchestrator.start(seq, filters);
        debug!(seq, "Search started");
        Ok(seq)
    }

    /// Drive search events until nothing is loading.
    pub async fn wait_for_search(&mut self) -> Result<&DashboardState> {
        while self.state.is_loading() {
            let Some(event) = self.events_rx.recv().await else {
                return Err(ScoutAdsError::Source("search channel closed".into()));
            };
            self.apply_search_event(event)?;
        }
        Ok(&self.state)
    }

    /// Apply any search outcomes that have already arrived. Returns how many
    /// were applied.
    pub fn poll_events(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_search_event(event)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn apply_search_event(&mut self, event: DashboardEvent) -> Result<()> {
        let dropped_before = self.state.stale_dropped;
        let seq = event.search_seq();
        self.dispatch(event)?;
        if self.state.stale_dropped > dropped_before {
            debug!(seq, latest = self.state.latest_seq, "Dropped stale search outcome");
        } else if let Some(ms) = self.state.last_search_ms.filter(|_| !self.state.is_loading()) {
            debug!(seq, total = self.state.total, search_time_ms = ms, "Search settled");
        }
        Ok(())
    }

    /// Abort the in-flight search, if any. Returns whether one was cancelled.
    pub fn cancel_search(&mut self) -> Result<bool> {
        if !self.state.is_loading() {
            return Ok(false);
        }
        self.orchestrator.cancel();
        let seq = self.state.latest_seq;
        self.dispatch(DashboardEvent::SearchCancelled { seq })?;
        info!(seq, "Search cancelled");
        Ok(true)
    }

    // --- Card actions ---

    /// Flip the saved flag of a creative. Returns true when it is now saved.
    pub fn toggle_save(&mut self, creative_id: &str) -> Result<bool> {
        self.dispatch(DashboardEvent::SaveToggled {
            creative_id: creative_id.to_string(),
        })?;
        self.prefs.save(SAVED_KEY, &self.state.saved.to_vec());
        Ok(self.state.is_saved(creative_id))
    }

    pub fn download(&mut self, creative_id: &str) -> Result<()> {
        self.dispatch(DashboardEvent::DownloadRequested {
            creative_id: creative_id.to_string(),
        })?;
        info!(creative_id, "Download requested");
        Ok(())
    }

    pub fn view_details(&mut self, creative_id: &str) -> Result<()> {
        self.dispatch(DashboardEvent::DetailsRequested {
            creative_id: creative_id.to_string(),
        })?;
        info!(creative_id, "Details requested");
        Ok(())
    }

    /// Returns the new auto-crawl flag. Nothing crawls yet.
    pub fn toggle_auto_crawl(&mut self) -> Result<bool> {
        self.dispatch(DashboardEvent::AutoCrawlToggled)?;
        info!(enabled = self.state.auto_crawling, "Auto-crawl toggled");
        Ok(self.state.auto_crawling)
    }

    // --- Reads ---

    /// Look a creative up in the current results, then in the source.
    pub async fn find_creative(&self, creative_id: &str) -> Result<Creative> {
        if let Some(c) = self
            .state
            .creatives
            .iter()
            .find(|c| c.creative_id == creative_id)
        {
            return Ok(c.clone());
        }
        self.orchestrator
            .source()
            .fetch_all()
            .await?
            .into_iter()
            .find(|c| c.creative_id == creative_id)
            .ok_or_else(|| ScoutAdsError::NotFound(format!("creative {creative_id}")))
    }

    pub async fn breakdown(&self, creative_id: &str) -> Result<ScoreBreakdown> {
        let creative = self.find_creative(creative_id).await?;
        Ok(score_breakdown(&creative))
    }

    pub fn top_advertisers(&self) -> Vec<AdvertiserCount> {
        self.state.top_advertisers(self.top_n)
    }

    pub fn top_countries(&self) -> Vec<CountryCount> {
        self.state.top_countries(self.top_n)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn preferences(&self) -> &Preferences<K> {
        &self.prefs
    }

    /// Every event dispatched so far, oldest first.
    pub fn events(&self) -> Vec<StoredEvent> {
        self.sink.events()
    }
}
