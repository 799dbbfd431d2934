//! Scenario data structures for a single projection run

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// A recurring spend line (housing, groceries, school fees, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub label: String,

    /// Annual amount at today's prices
    pub amount_today: f64,

    /// Annual growth applied from `start_age`
    pub annual_growth: f64,

    /// First age at which the line is paid
    pub start_age: u32,

    /// Number of years paid; 999 means "for the rest of the horizon"
    pub active_years: u32,
}

impl RecurringExpense {
    pub fn new(
        label: impl Into<String>,
        amount_today: f64,
        annual_growth: f64,
        start_age: u32,
        active_years: u32,
    ) -> Self {
        Self {
            label: label.into(),
            amount_today,
            annual_growth,
            start_age,
            active_years,
        }
    }

    /// Active while `start_age <= age < start_age + active_years`
    pub fn is_active_at(&self, age: u32) -> bool {
        age >= self.start_age && age < self.start_age.saturating_add(self.active_years)
    }

    /// Years of growth at `age`, never negative
    pub fn growth_years(&self, age: u32) -> u32 {
        age.saturating_sub(self.start_age)
    }

    /// Nominal amount paid at `age`, zero when the line is inactive
    pub fn amount_at(&self, age: u32) -> f64 {
        if !self.is_active_at(age) {
            return 0.0;
        }
        self.amount_today * (1.0 + self.annual_growth).powi(self.growth_years(age) as i32)
    }
}

/// A one-off outflow (education, renovation, car replacement, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimeEvent {
    pub label: String,

    /// The event fires once, in the year `age == trigger_age`
    pub trigger_age: u32,

    /// Cost at today's prices
    pub amount_today: f64,

    /// Inflation compounded from the scenario's current age
    pub inflation_rate: f64,
}

impl OneTimeEvent {
    pub fn new(
        label: impl Into<String>,
        trigger_age: u32,
        amount_today: f64,
        inflation_rate: f64,
    ) -> Self {
        Self {
            label: label.into(),
            trigger_age,
            amount_today,
            inflation_rate,
        }
    }

    pub fn fires_at(&self, age: u32) -> bool {
        age == self.trigger_age
    }

    /// Years of inflation, counted from `current_age` rather than from the
    /// event's own age
    pub fn inflation_years(&self, current_age: u32) -> u32 {
        self.trigger_age.saturating_sub(current_age)
    }

    /// Nominal cost at `age`, zero unless the event fires that year
    pub fn amount_at(&self, age: u32, current_age: u32) -> f64 {
        if !self.fires_at(age) {
            return 0.0;
        }
        self.amount_today * (1.0 + self.inflation_rate).powi(self.inflation_years(current_age) as i32)
    }
}

/// Life-expectancy presets offered alongside a free-form `life_age`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongevityPreset {
    Age85,
    Age90,
    Age95,
}

impl LongevityPreset {
    pub const ALL: [LongevityPreset; 3] = [
        LongevityPreset::Age85,
        LongevityPreset::Age90,
        LongevityPreset::Age95,
    ];

    pub fn life_age(&self) -> u32 {
        match self {
            LongevityPreset::Age85 => 85,
            LongevityPreset::Age90 => 90,
            LongevityPreset::Age95 => 95,
        }
    }

    pub fn from_age(age: u32) -> Result<Self> {
        match age {
            85 => Ok(LongevityPreset::Age85),
            90 => Ok(LongevityPreset::Age90),
            95 => Ok(LongevityPreset::Age95),
            other => Err(PlanError::UnknownPreset(other)),
        }
    }
}

/// Complete input to one projection run.
///
/// Missing fields in a deserialized scenario fall back to the indicative
/// defaults, one field at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub current_age: u32,

    /// Contributions stop and withdrawals begin at this age
    pub freedom_age: u32,

    /// Terminal age (inclusive)
    pub life_age: u32,

    /// Annual inflation, also used by the stress conversion
    pub inflation: f64,

    /// Nominal post-tax return before the expense ratio
    pub nominal_return: f64,

    /// Annual fund fee subtracted from `nominal_return`
    pub expense_ratio: f64,

    /// Markup on every year's spend (0.15 = +15%)
    pub safety_buffer: f64,

    /// Investable assets today, before any extra lump sum
    pub current_corpus: f64,

    /// Paid every year while `age < freedom_age`, annualized x12
    pub monthly_contribution: f64,

    /// Pension, rent, etc. offsetting spend from `freedom_age` onward
    pub annual_retirement_income: f64,

    /// Apply the bear-market real-return haircut for the first decade of freedom
    pub stress_enabled: bool,

    pub recurring: Vec<RecurringExpense>,

    pub events: Vec<OneTimeEvent>,
}

impl Scenario {
    /// Indicative Indian household used for seeding and examples
    pub fn indicative() -> Self {
        Self {
            current_age: 40,
            freedom_age: 55,
            life_age: 85,
            inflation: 0.06,
            nominal_return: 0.08,
            expense_ratio: 0.0075,
            safety_buffer: 0.15,
            current_corpus: 2_000_000.0,
            monthly_contribution: 30_000.0,
            annual_retirement_income: 240_000.0,
            stress_enabled: false,
            recurring: vec![
                RecurringExpense::new("Housing & Utilities", 360_000.0, 0.05, 40, 45),
                RecurringExpense::new("Groceries & Essentials", 240_000.0, 0.06, 40, 999),
                RecurringExpense::new("Transport", 120_000.0, 0.05, 40, 999),
                RecurringExpense::new("Healthcare & Insurance", 150_000.0, 0.10, 40, 999),
                RecurringExpense::new("Discretionary (Dining/Travel)", 180_000.0, 0.07, 55, 30),
                RecurringExpense::new("Parents Support", 120_000.0, 0.06, 40, 10),
                RecurringExpense::new("Children Schooling", 200_000.0, 0.08, 40, 10),
            ],
            events: vec![
                OneTimeEvent::new("Child Higher Education", 45, 10_000_000.0, 0.06),
                OneTimeEvent::new("Home Renovation", 50, 2_500_000.0, 0.06),
                OneTimeEvent::new("Car Replacement", 60, 2_000_000.0, 0.05),
                OneTimeEvent::new("Medical Contingency", 70, 3_000_000.0, 0.10),
            ],
        }
    }

    /// Number of simulated years, one per age in `current_age..=life_age`
    /// (zero when `life_age < current_age`)
    pub fn horizon_years(&self) -> usize {
        match self.life_age.checked_sub(self.current_age) {
            Some(span) => span as usize + 1,
            None => 0,
        }
    }

    pub fn annual_contribution(&self) -> f64 {
        self.monthly_contribution * 12.0
    }

    pub fn with_life_age(&self, life_age: u32) -> Self {
        Self {
            life_age,
            ..self.clone()
        }
    }

    pub fn with_longevity(&self, preset: LongevityPreset) -> Self {
        self.with_life_age(preset.life_age())
    }

    pub fn with_stress(&self, stress_enabled: bool) -> Self {
        Self {
            stress_enabled,
            ..self.clone()
        }
    }

    /// Reject structurally invalid scenarios before they reach the engine.
    ///
    /// The engine itself never re-validates; loaders and the CLI call this.
    pub fn validate(&self) -> Result<()> {
        if self.freedom_age < self.current_age {
            return Err(PlanError::Invalid(
                "freedom_age must be >= current_age".to_string(),
            ));
        }
        if self.life_age < self.freedom_age {
            return Err(PlanError::Invalid(
                "life_age must be >= freedom_age".to_string(),
            ));
        }

        let rates = [
            ("inflation", self.inflation),
            ("nominal_return", self.nominal_return),
            ("expense_ratio", self.expense_ratio),
            ("safety_buffer", self.safety_buffer),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value <= -1.0 {
                return Err(PlanError::Invalid(format!(
                    "{name} must be a finite rate above -100%"
                )));
            }
        }

        let amounts = [
            ("current_corpus", self.current_corpus),
            ("monthly_contribution", self.monthly_contribution),
            ("annual_retirement_income", self.annual_retirement_income),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::Invalid(format!(
                    "{name} must be a finite, non-negative amount"
                )));
            }
        }

        for row in &self.recurring {
            if !row.amount_today.is_finite() || row.amount_today < 0.0 {
                return Err(PlanError::Invalid(format!(
                    "recurring expense '{}' has an invalid amount",
                    row.label
                )));
            }
            if !row.annual_growth.is_finite() || row.annual_growth <= -1.0 {
                return Err(PlanError::Invalid(format!(
                    "recurring expense '{}' has an invalid growth rate",
                    row.label
                )));
            }
        }

        for event in &self.events {
            if !event.amount_today.is_finite() || event.amount_today < 0.0 {
                return Err(PlanError::Invalid(format!(
                    "event '{}' has an invalid amount",
                    event.label
                )));
            }
            if !event.inflation_rate.is_finite() || event.inflation_rate <= -1.0 {
                return Err(PlanError::Invalid(format!(
                    "event '{}' has an invalid inflation rate",
                    event.label
                )));
            }
        }

        Ok(())
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::indicative()
    }
}
