//! Headline figures derived from a solved projection

use serde::{Deserialize, Serialize};

use crate::inputs::Scenario;
use crate::projection::{GoalSeekOutcome, YearRecord};

/// Rule-of-thumb multiple of annual spend for a sustainable corpus
pub const CAPITAL_MULTIPLE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    /// Recurring spend active at the current age, at today's prices, unbuffered
    pub annual_spend_today: f64,

    /// `annual_spend_today * 40`
    pub capital_rule_of_thumb: f64,

    /// Extra lump sum needed today; None when no lump sum suffices
    pub required_lump_sum: Option<f64>,

    /// Highest closing corpus over the horizon
    pub peak_corpus: Option<f64>,

    /// Buffered spend over opening corpus in the freedom-age year
    pub implied_withdrawal_rate: Option<f64>,
}

impl PlanMetrics {
    /// `records` should be the projection run with the solved lump sum
    pub fn compute(scenario: &Scenario, records: &[YearRecord], outcome: &GoalSeekOutcome) -> Self {
        let annual_spend_today = annual_spend_today(scenario);
        Self {
            annual_spend_today,
            capital_rule_of_thumb: annual_spend_today * CAPITAL_MULTIPLE,
            required_lump_sum: outcome.lump_sum(),
            peak_corpus: peak_corpus(records),
            implied_withdrawal_rate: implied_withdrawal_rate(scenario, records),
        }
    }
}

pub fn annual_spend_today(scenario: &Scenario) -> f64 {
    scenario
        .recurring
        .iter()
        .filter(|row| row.is_active_at(scenario.current_age))
        .map(|row| row.amount_today)
        .sum()
}

pub fn peak_corpus(records: &[YearRecord]) -> Option<f64> {
    records.iter().map(|r| r.end_corpus).reduce(f64::max)
}

/// None when the freedom year is outside the horizon or opens with no corpus
pub fn implied_withdrawal_rate(scenario: &Scenario, records: &[YearRecord]) -> Option<f64> {
    records
        .iter()
        .find(|r| r.age == scenario.freedom_age)
        .filter(|r| r.start_corpus > 0.0)
        .map(|r| r.buffered_spend / r.start_corpus)
}
