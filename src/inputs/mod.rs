//! Scenario inputs, indicative defaults and file loading

mod data;
pub mod loader;

pub use data::{LongevityPreset, OneTimeEvent, RecurringExpense, Scenario};
pub use loader::{load_default_scenario, ScenarioFiles, DEFAULT_DATA_PATH};
