pub mod dashboard;
pub mod events;
pub mod orchestrator;
pub mod reducer;
pub mod state;

pub use dashboard::Dashboard;
pub use events::DashboardEvent;
pub use orchestrator::{run_search, SearchOrchestrator};
pub use reducer::DashboardReducer;
pub use state::{DashboardState, SearchPhase};
