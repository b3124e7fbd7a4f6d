//! Dashboard state owned by the reducer.

use scoutads_common::{AdvertiserCount, Creative, CountryCount, SearchFilters};
use scoutads_query::{summarize, top_advertisers_n, top_countries_n, ResultSummary};
use scoutads_store::SavedCreatives;

/// Where the current search stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading {
        seq: u64,
    },
    Loaded {
        seq: u64,
    },
    Failed {
        seq: u64,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub filters: SearchFilters,
    pub phase: SearchPhase,
    /// Results of the last completed search, in display order.
    pub creatives: Vec<Creative>,
    pub total: usize,
    pub last_search_ms: Option<u64>,
    pub saved: SavedCreatives,
    pub auto_crawling: bool,
    /// Seq of the most recently requested search. Only it may complete.
    pub latest_seq: u64,
    pub last_loaded_seq: Option<u64>,
    /// Completions or failures that arrived for a superseded search.
    pub stale_dropped: u32,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_saved(&self, creative_id: &str) -> bool {
        self.saved.contains(creative_id)
    }

    pub fn top_advertisers(&self, n: usize) -> Vec<AdvertiserCount> {
        top_advertisers_n(&self.creatives, n)
    }

    pub fn top_countries(&self, n: usize) -> Vec<CountryCount> {
        top_countries_n(&self.creatives, n)
    }

    pub fn summary(&self) -> ResultSummary {
        summarize(&self.creatives)
    }
}
