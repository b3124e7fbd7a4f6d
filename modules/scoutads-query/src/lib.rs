//! Pure query functions over creative collections.
//!
//! Filter narrows, sort orders, aggregate and score summarise. None of them
//! mutate their input or keep state between calls.

pub mod aggregate;
pub mod filter;
pub mod score;
pub mod sort;

pub use aggregate::{summarize, top_advertisers, top_advertisers_n, top_countries, top_countries_n, ResultSummary};
pub use filter::{filter_creatives, matches};
pub use score::score_breakdown;
pub use sort::{sort_by_score, sort_creatives};
