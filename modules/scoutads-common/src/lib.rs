pub mod types;
pub mod countries;
pub mod config;
pub mod error;
pub mod format;
pub mod quality;

pub use types::*;
pub use countries::{country_flag, country_name};
pub use config::{Config, FileConfig};
pub use error::{Result, ScoutAdsError};
pub use format::*;
pub use quality::*;
