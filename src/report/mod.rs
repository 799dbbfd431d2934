//! Presentation-side derivations: headline metrics, year audits, CSV export

mod audit;
mod export;
mod metrics;

pub use audit::{audit_year, LineItem, YearAudit};
pub use export::{write_projection_csv, write_projection_csv_file};
pub use metrics::{
    annual_spend_today, implied_withdrawal_rate, peak_corpus, PlanMetrics, CAPITAL_MULTIPLE,
};
