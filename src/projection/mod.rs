//! Corpus projection and the lump-sum goal-seek

mod cashflows;
mod engine;
pub mod rates;
mod solver;

pub use cashflows::{ProjectionSummary, YearRecord};
pub use engine::{event_spend_at, project, project_year, recurring_spend_at, terminal_corpus};
pub use rates::effective_rate;
pub use solver::{
    goal_seek, solve, solve_with, GoalSeekConfig, GoalSeekOutcome, DEFAULT_INITIAL_HIGH,
    DEFAULT_MAX_EXPANSIONS, DEFAULT_MAX_ITERATIONS,
};
