//! Everything that can happen to the dashboard.
//!
//! User intents and search lifecycle events share one enum so the reducer is
//! the only place dashboard state changes.

use serde::{Deserialize, Serialize};
use serde_json::json;

use scoutads_common::{SearchFilters, SearchResponse, SortField, SortOrder};
use scoutads_engine::EventLike;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    // Preferences
    PreferencesLoaded {
        filters: SearchFilters,
        saved: Vec<String>,
    },

    // Filter editing
    FiltersChanged {
        filters: SearchFilters,
    },
    SortChanged {
        sort_by: SortField,
        sort_order: SortOrder,
    },
    FiltersReset,

    // Search lifecycle
    SearchRequested {
        seq: u64,
        filters: SearchFilters,
    },
    SearchCompleted {
        seq: u64,
        response: SearchResponse,
    },
    SearchFailed {
        seq: u64,
        message: String,
    },
    SearchCancelled {
        seq: u64,
    },

    // Card actions
    SaveToggled {
        creative_id: String,
    },
    DownloadRequested {
        creative_id: String,
    },
    DetailsRequested {
        creative_id: String,
    },

    // Crawler control (placeholder)
    AutoCrawlToggled,
}

impl DashboardEvent {
    /// Sequence number for search lifecycle events.
    pub fn search_seq(&self) -> Option<u64> {
        match self {
            DashboardEvent::SearchRequested { seq, .. }
            | DashboardEvent::SearchCompleted { seq, .. }
            | DashboardEvent::SearchFailed { seq, .. }
            | DashboardEvent::SearchCancelled { seq } => Some(*seq),
            _ => None,
        }
    }
}

impl EventLike for DashboardEvent {
    fn event_type_str(&self) -> String {
        match self {
            DashboardEvent::PreferencesLoaded { .. } => "prefs:loaded",
            DashboardEvent::FiltersChanged { .. } => "filters:changed",
            DashboardEvent::SortChanged { .. } => "filters:sort_changed",
            DashboardEvent::FiltersReset => "filters:reset",
            DashboardEvent::SearchRequested { .. } => "search:requested",
            DashboardEvent::SearchCompleted { .. } => "search:completed",
            DashboardEvent::SearchFailed { .. } => "search:failed",
            DashboardEvent::SearchCancelled { .. } => "search:cancelled",
            DashboardEvent::SaveToggled { .. } => "creative:save_toggled",
            DashboardEvent::DownloadRequested { .. } => "creative:download_requested",
            DashboardEvent::DetailsRequested { .. } => "creative:details_requested",
            DashboardEvent::AutoCrawlToggled => "crawler:auto_toggled",
        }
        .to_string()
    }

    /// Completed searches are logged by id only; the records themselves are
    /// fixtures and would bloat the log.
    fn to_persist_payload(&self) -> serde_json::Value {
        match self {
            DashboardEvent::SearchCompleted { seq, response } => json!({
                "type": "search_completed",
                "seq": seq,
                "total": response.total,
                "search_time_ms": response.search_time_ms,
                "creative_ids": response
                    .items
                    .iter()
                    .map(|c| c.creative_id.as_str())
                    .collect::<Vec<_>>(),
            }),
            other => serde_json::to_value(other)
                .expect("DashboardEvent serialization should never fail"),
        }
    }
}
