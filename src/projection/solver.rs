//! Goal-seek for the extra lump sum needed today
//!
//! Bisection over the terminal corpus, treating the projection engine as a
//! black box: `f(lump) = project(scenario, lump).last().end_corpus`, which is
//! non-decreasing in `lump`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::engine::terminal_corpus;
use crate::inputs::Scenario;

/// Initial upper bracket: one crore
pub const DEFAULT_INITIAL_HIGH: f64 = 10_000_000.0;

/// Doublings of the upper bracket before giving up
pub const DEFAULT_MAX_EXPANSIONS: u32 = 40;

/// Bisection steps before settling for a best effort
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Goal-seek tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSeekConfig {
    /// Terminal corpus to aim for (normally zero)
    pub target_end_corpus: f64,

    /// Accept a lump sum whose terminal corpus is within this of the target
    pub tolerance: f64,

    /// Starting upper bracket; a non-positive or non-finite value falls back
    /// to [`DEFAULT_INITIAL_HIGH`] since doubling could never grow it
    pub initial_high: f64,
    pub max_expansions: u32,
    pub max_iterations: u32,
}

impl Default for GoalSeekConfig {
    fn default() -> Self {
        Self {
            target_end_corpus: 0.0,
            tolerance: 1.0,
            initial_high: DEFAULT_INITIAL_HIGH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Result of a goal-seek
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalSeekOutcome {
    /// Terminal corpus within tolerance of the target
    Converged {
        lump_sum: f64,
        end_corpus: f64,
        iterations: u32,
    },
    /// Iterations ran out; midpoint of the final bracket
    BestEffort { lump_sum: f64, end_corpus: f64 },
    /// Even the largest bracket falls short of the target
    NotFound { search_high: f64, end_corpus: f64 },
}

impl GoalSeekOutcome {
    /// The lump sum, unless the scenario is unsolvable by lump sum alone
    pub fn lump_sum(&self) -> Option<f64> {
        match *self {
            GoalSeekOutcome::Converged { lump_sum, .. } => Some(lump_sum),
            GoalSeekOutcome::BestEffort { lump_sum, .. } => Some(lump_sum),
            GoalSeekOutcome::NotFound { .. } => None,
        }
    }

    pub fn end_corpus(&self) -> f64 {
        match *self {
            GoalSeekOutcome::Converged { end_corpus, .. }
            | GoalSeekOutcome::BestEffort { end_corpus, .. }
            | GoalSeekOutcome::NotFound { end_corpus, .. } => end_corpus,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, GoalSeekOutcome::Converged { .. })
    }
}

/// Extra lump sum that brings the terminal corpus to zero, within 1
pub fn solve(scenario: &Scenario) -> GoalSeekOutcome {
    solve_with(scenario, GoalSeekConfig::default())
}

pub fn solve_with(scenario: &Scenario, config: GoalSeekConfig) -> GoalSeekOutcome {
    goal_seek(|lump| terminal_corpus(scenario, lump), config)
}

/// NaN counts as short so a broken oracle ends in `NotFound`
fn falls_short(end_corpus: f64, target: f64) -> bool {
    end_corpus.is_nan() || end_corpus < target
}

/// Bisection of a non-decreasing `oracle` on `[0, high]`, growing `high` by
/// doubling until the target is bracketed
pub fn goal_seek<F>(oracle: F, config: GoalSeekConfig) -> GoalSeekOutcome
where
    F: Fn(f64) -> f64,
{
    let target = config.target_end_corpus;
    let mut low = 0.0_f64;
    let mut high = if config.initial_high.is_finite() && config.initial_high > 0.0 {
        config.initial_high
    } else {
        DEFAULT_INITIAL_HIGH
    };

    let mut end_high = oracle(high);
    let mut expansions = 0;
    while falls_short(end_high, target) && expansions < config.max_expansions {
        high *= 2.0;
        end_high = oracle(high);
        expansions += 1;
    }
    debug!("Bracket [0, {high:.2}] after {expansions} expansions, f(high) = {end_high:.2}");

    if falls_short(end_high, target) {
        warn!("No lump sum up to {high:.2} reaches target {target:.2} (best {end_high:.2})");
        return GoalSeekOutcome::NotFound {
            search_high: high,
            end_corpus: end_high,
        };
    }

    for iteration in 1..=config.max_iterations {
        let mid = (low + high) / 2.0;
        let end_mid = oracle(mid);

        if (end_mid - target).abs() <= config.tolerance {
            debug!("Converged after {iteration} iterations: lump {mid:.2}, end {end_mid:.2}");
            return GoalSeekOutcome::Converged {
                lump_sum: mid,
                end_corpus: end_mid,
                iterations: iteration,
            };
        }

        if end_mid > target {
            high = mid;
        } else {
            low = mid;
        }
    }

    let lump_sum = (low + high) / 2.0;
    let end_corpus = oracle(lump_sum);
    warn!(
        "Goal-seek hit {} iterations without meeting tolerance; best effort lump {lump_sum:.2}",
        config.max_iterations
    );
    GoalSeekOutcome::BestEffort {
        lump_sum,
        end_corpus,
    }
}
