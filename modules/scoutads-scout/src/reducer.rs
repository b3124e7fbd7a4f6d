//! Pure state updates for the dashboard.
//!
//! Every event passes through here. No I/O and no logging: persistence and
//! task management live in `Dashboard`.

use scoutads_engine::Reducer;
use scoutads_store::SavedCreatives;

use crate::events::DashboardEvent;
use crate::state::{DashboardState, SearchPhase};

pub struct DashboardReducer;

impl Reducer<DashboardEvent, DashboardState> for DashboardReducer {
    fn reduce(&self, state: &mut DashboardState, event: &DashboardEvent) {
        match event {
            // Preferences
            DashboardEvent::PreferencesLoaded { filters, saved } => {
                state.filters = filters.clone();
                state.saved = SavedCreatives::from_vec(saved.clone());
            }

            // Filter editing
            DashboardEvent::FiltersChanged { filters } => {
                state.filters = filters.clone();
            }
            DashboardEvent::SortChanged {
                sort_by,
                sort_order,
            } => {
                state.filters.sort_by = *sort_by;
                state.filters.sort_order = *sort_order;
            }
            DashboardEvent::FiltersReset => {
                state.filters = Default::default();
            }

            // Search lifecycle
            DashboardEvent::SearchRequested { seq, filters } => {
                state.filters = filters.clone();
                state.latest_seq = *seq;
                state.phase = SearchPhase::Loading { seq: *seq };
            }
            DashboardEvent::SearchCompleted { seq, response } => {
                if !is_current(state, *seq) {
                    state.stale_dropped += 1;
                    return;
                }
                state.creatives = response.items.clone();
                state.total = response.total;
                state.last_search_ms = Some(response.search_time_ms);
                state.last_loaded_seq = Some(*seq);
                state.phase = SearchPhase::Loaded { seq: *seq };
            }
            DashboardEvent::SearchFailed { seq, message } => {
                if !is_current(state, *seq) {
                    state.stale_dropped += 1;
                    return;
                }
                // Previous results stay on screen under the error.
                state.phase = SearchPhase::Failed {
                    seq: *seq,
                    message: message.clone(),
                };
            }
            DashboardEvent::SearchCancelled { seq } => {
                if !is_current(state, *seq) {
                    return;
                }
                state.phase = match state.last_loaded_seq {
                    Some(last) => SearchPhase::Loaded { seq: last },
                    None => SearchPhase::Idle,
                };
            }

            // Card actions
            DashboardEvent::SaveToggled { creative_id } => {
                state.saved.toggle(creative_id);
            }
            DashboardEvent::DownloadRequested { .. } | DashboardEvent::DetailsRequested { .. } => {}

            DashboardEvent::AutoCrawlToggled => {
                state.auto_crawling = !state.auto_crawling;
            }
        }
    }
}

/// A search outcome applies only to the latest request while it is loading.
fn is_current(state: &DashboardState, seq: u64) -> bool {
    seq == state.latest_seq && state.phase == SearchPhase::Loading { seq }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoutads_common::{SearchFilters, SearchResponse, SortField, SortOrder};
    use scoutads_store::fixtures::mock_creatives;

    fn reduce(state: &mut DashboardState, event: DashboardEvent) {
        DashboardReducer.reduce(state, &event);
    }

    fn completed(seq: u64, n: usize) -> DashboardEvent {
        let items: Vec<_> = mock_creatives().into_iter().take(n).collect();
        DashboardEvent::SearchCompleted {
            seq,
            response: SearchResponse {
                total: items.len(),
                items,
                filters_applied: SearchFilters::default(),
                search_time_ms: 1200,
            },
        }
    }

    fn requested(seq: u64) -> DashboardEvent {
        DashboardEvent::SearchRequested {
            seq,
            filters: SearchFilters::default(),
        }
    }

    #[test]
    fn request_then_complete_loads_results() {
        let mut state = DashboardState::default();
        reduce(&mut state, requested(1));
        assert!(state.is_loading());

        reduce(&mut state, completed(1, 3));
        assert_eq!(state.phase, SearchPhase::Loaded { seq: 1 });
        assert_eq!(state.total, 3);
        assert_eq!(state.last_search_ms, Some(1200));
    }

    #[test]
    fn superseded_completion_is_dropped() {
        let mut state = DashboardState::default();
        reduce(&mut state, requested(1));
        reduce(&mut state, requested(2));
        reduce(&mut state, completed(1, 5));

        assert_eq!(state.phase, SearchPhase::Loading { seq: 2 });
        assert!(state.creatives.is_empty());
        assert_eq!(state.stale_dropped, 1);

        reduce(&mut state, completed(2, 2));
        assert_eq!(state.phase, SearchPhase::Loaded { seq: 2 });
        assert_eq!(state.total, 2);
    }

    #[test]
    fn duplicate_completion_after_load_is_dropped() {
        let mut state = DashboardState::default();
        reduce(&mut state, requested(1));
        reduce(&mut state, completed(1, 2));
        reduce(&mut state, completed(1, 7));

        assert_eq!(state.total, 2);
        assert_eq!(state.stale_dropped, 1);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut state = DashboardState::default();
        reduce(&mut state, requested(1));
        reduce(&mut state, completed(1, 4));
        reduce(&mut state, requested(2));
        reduce(
            &mut state,
            DashboardEvent::SearchFailed {
                seq: 2,
                message: "source unavailable".into(),
            },
        );

        assert_eq!(state.error(), Some("source unavailable"));
        assert_eq!(state.creatives.len(), 4);
    }

    #[test]
    fn cancel_returns_to_last_loaded_or_idle() {
        let mut state = DashboardState::default();
        reduce(&mut state, requested(1));
        reduce(&mut state, DashboardEvent::SearchCancelled { seq: 1 });
        assert_eq!(state.phase, SearchPhase::Idle);

        reduce(&mut state, requested(2));
        reduce(&mut state, completed(2, 1));
        reduce(&mut state, requested(3));
        reduce(&mut state, DashboardEvent::SearchCancelled { seq: 3 });
        assert_eq!(state.phase, SearchPhase::Loaded { seq: 2 });
    }

    #[test]
    fn sort_change_touches_only_sort_fields() {
        let mut state = DashboardState::default();
        state.filters.min_duplicates = 20;
        reduce(
            &mut state,
            DashboardEvent::SortChanged {
                sort_by: SortField::DaysActive,
                sort_order: SortOrder::Asc,
            },
        );
        assert_eq!(state.filters.min_duplicates, 20);
        assert_eq!(state.filters.sort_by, SortField::DaysActive);
        assert_eq!(state.filters.sort_order, SortOrder::Asc);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = DashboardState::default();
        state.filters.countries = vec!["BR".into()];
        reduce(&mut state, DashboardEvent::FiltersReset);
        assert_eq!(state.filters, SearchFilters::default());
    }

    #[test]
    fn save_toggle_twice_restores_set() {
        let mut state = DashboardState::default();
        reduce(&mut state, DashboardEvent::SaveToggled { creative_id: "4".into() });
        assert!(state.is_saved("4"));
        reduce(&mut state, DashboardEvent::SaveToggled { creative_id: "4".into() });
        assert!(state.saved.is_empty());
    }

    #[test]
    fn placeholders_leave_state_untouched() {
        let mut state = DashboardState::default();
        reduce(&mut state, DashboardEvent::DownloadRequested { creative_id: "1".into() });
        reduce(&mut state, DashboardEvent::DetailsRequested { creative_id: "1".into() });
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(state.saved.is_empty());

        reduce(&mut state, DashboardEvent::AutoCrawlToggled);
        assert!(state.auto_crawling);
    }
}
