//! Core projection engine for yearly corpus roll-forward
//!
//! Canonical conventions, held fixed:
//! - contributions are made at the start of the year and grow in that year
//! - retirement income offsets spend after the safety buffer is applied
//! - one-time events are inflated from the scenario's current age

use super::cashflows::YearRecord;
use super::rates::effective_rate;
use crate::inputs::Scenario;

/// Project the corpus from `current_age` to `life_age` inclusive.
///
/// `extra_lump_sum` is invested today on top of `current_corpus`. Every call
/// starts from scratch; the output has `life_age - current_age + 1` records,
/// each opening on the previous record's closing corpus. A negative corpus is
/// a depletion signal and is carried forward unclamped.
pub fn project(scenario: &Scenario, extra_lump_sum: f64) -> Vec<YearRecord> {
    let opening = extra_lump_sum + scenario.current_corpus;

    (scenario.current_age..=scenario.life_age)
        .scan(opening, |corpus, age| {
            let record = project_year(scenario, age, *corpus);
            *corpus = record.end_corpus;
            Some(record)
        })
        .collect()
}

/// Closing corpus at `life_age` for a given lump sum
pub fn terminal_corpus(scenario: &Scenario, extra_lump_sum: f64) -> f64 {
    project(scenario, extra_lump_sum)
        .last()
        .map(|r| r.end_corpus)
        .unwrap_or(extra_lump_sum + scenario.current_corpus)
}

/// Sum of recurring lines active at `age`
pub fn recurring_spend_at(scenario: &Scenario, age: u32) -> f64 {
    scenario.recurring.iter().map(|row| row.amount_at(age)).sum()
}

/// Sum of one-time events firing at `age`
pub fn event_spend_at(scenario: &Scenario, age: u32) -> f64 {
    scenario
        .events
        .iter()
        .map(|event| event.amount_at(age, scenario.current_age))
        .sum()
}

/// Roll a single year forward from `start_corpus`
pub fn project_year(scenario: &Scenario, age: u32, start_corpus: f64) -> YearRecord {
    let contribution = if age < scenario.freedom_age {
        scenario.annual_contribution()
    } else {
        0.0
    };
    let invested = start_corpus + contribution;

    let recurring_spend = recurring_spend_at(scenario, age);
    let event_spend = event_spend_at(scenario, age);
    let total_spend = recurring_spend + event_spend;

    let mut buffered_spend = total_spend * (1.0 + scenario.safety_buffer);
    if age >= scenario.freedom_age && scenario.annual_retirement_income > 0.0 {
        let net = buffered_spend - scenario.annual_retirement_income;
        // Comparison rather than f64::max so a NaN spend still propagates
        buffered_spend = if net < 0.0 { 0.0 } else { net };
    }

    let rate = effective_rate(scenario, age);
    let investment_return = invested * rate;
    let end_corpus = invested + investment_return - buffered_spend;

    YearRecord {
        age,
        recurring_spend,
        event_spend,
        total_spend,
        buffered_spend,
        start_corpus,
        contribution,
        effective_rate: rate,
        investment_return,
        end_corpus,
    }
}
