//! Record store and local preference store.
//!
//! `source` supplies creative collections (fixtures today, a remote query
//! later). `prefs` persists filters and the saved set as JSON, best effort.

pub mod fixtures;
pub mod prefs;
pub mod source;

pub use prefs::{FileStore, KeyValueStore, MemoryStore, Preferences, SavedCreatives, FILTERS_KEY, SAVED_KEY};
pub use source::{CreativeSource, FixtureSource, JsonFileSource};
