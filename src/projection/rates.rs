//! Effective annual growth rate, with the optional bear-market stress
//!
//! Stress is a real-return shock: inflation is assumed unaffected, so the
//! haircut is applied after converting the nominal rate to real and the
//! result converted back with the exact Fisher relation.

use crate::inputs::Scenario;

/// Length of the stress window, counted from the freedom age
pub const STRESS_WINDOW_YEARS: u32 = 10;

/// Reduction of the real return inside the stress window
pub const STRESS_REAL_HAIRCUT: f64 = 0.02;

/// Nominal return net of the expense ratio; may be negative
pub fn base_rate(scenario: &Scenario) -> f64 {
    scenario.nominal_return - scenario.expense_ratio
}

/// `(1 + nominal) / (1 + inflation) - 1`
pub fn to_real(nominal: f64, inflation: f64) -> f64 {
    (1.0 + nominal) / (1.0 + inflation) - 1.0
}

/// `(1 + real) * (1 + inflation) - 1`
pub fn to_nominal(real: f64, inflation: f64) -> f64 {
    (1.0 + real) * (1.0 + inflation) - 1.0
}

/// Whether the stress haircut applies at `age`: `[freedom_age, freedom_age + 10)`
pub fn in_stress_window(scenario: &Scenario, age: u32) -> bool {
    scenario.stress_enabled
        && age >= scenario.freedom_age
        && age < scenario.freedom_age.saturating_add(STRESS_WINDOW_YEARS)
}

/// Growth rate applied to the corpus in the year the person is `age`
pub fn effective_rate(scenario: &Scenario, age: u32) -> f64 {
    let base = base_rate(scenario);
    if !in_stress_window(scenario, age) {
        return base;
    }

    let stressed_real = to_real(base, scenario.inflation) - STRESS_REAL_HAIRCUT;
    to_nominal(stressed_real, scenario.inflation)
}
