//! FreedomNumber - deterministic retirement corpus projection
//!
//! This library provides:
//! - A yearly projection of an investment corpus from today to end of life
//! - Recurring and one-time spend with a safety buffer and retirement income offset
//! - An optional bear-market stress on real returns for the first decade of freedom
//! - A goal-seek for the extra lump sum needed today to end at (about) zero
//! - Derived metrics, year audits, CSV export and parallel sensitivity sweeps

pub mod error;
pub mod inputs;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::PlanError;
pub use inputs::{LongevityPreset, OneTimeEvent, RecurringExpense, Scenario};
pub use projection::{project, solve, GoalSeekConfig, GoalSeekOutcome, YearRecord};
pub use report::PlanMetrics;
pub use scenario::ScenarioRunner;
