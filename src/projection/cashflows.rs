//! Yearly output rows of a projection

use serde::{Deserialize, Serialize};

/// One simulated year.
///
/// `start_corpus` is the opening balance (the previous year's `end_corpus`);
/// the year's contribution lands on top of it before growth and spend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub age: u32,

    // Spend
    pub recurring_spend: f64,
    pub event_spend: f64,
    pub total_spend: f64,
    /// Total spend with the safety buffer, net of retirement income once free
    pub buffered_spend: f64,

    // Corpus roll-forward
    pub start_corpus: f64,
    pub contribution: f64,
    pub effective_rate: f64,
    pub investment_return: f64,
    pub end_corpus: f64,
}

/// Totals over a whole projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_contribution: f64,
    pub total_investment_return: f64,
    pub total_buffered_spend: f64,
    pub final_corpus: f64,
    /// First age whose closing corpus is negative
    pub depletion_age: Option<u32>,
}

impl ProjectionSummary {
    pub fn from_records(records: &[YearRecord]) -> Self {
        let total_contribution: f64 = records.iter().map(|r| r.contribution).sum();
        let total_investment_return: f64 = records.iter().map(|r| r.investment_return).sum();
        let total_buffered_spend: f64 = records.iter().map(|r| r.buffered_spend).sum();

        let final_corpus = records.last().map(|r| r.end_corpus).unwrap_or(0.0);
        let depletion_age = records.iter().find(|r| r.end_corpus < 0.0).map(|r| r.age);

        Self {
            years: records.len() as u32,
            total_contribution,
            total_investment_return,
            total_buffered_spend,
            final_corpus,
            depletion_age,
        }
    }
}
