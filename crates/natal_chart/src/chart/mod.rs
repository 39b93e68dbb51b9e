pub mod engine;
pub mod query;
pub mod settings;
pub mod types;

pub use engine::ChartEngine;
pub use query::ChartQuery;
pub use settings::{validate_orb, ChartSettings, SettingsError, MAX_ORB};
pub use types::{tally_elements, ChartRequest, ChartResult, ChartSource};
