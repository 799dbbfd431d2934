//! Line-by-line breakdown of one projected year

use std::fmt;

use serde::Serialize;

use crate::inputs::Scenario;
use crate::projection::YearRecord;

/// One recurring row or event contributing to the year's spend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub label: String,
    pub amount_today: f64,
    /// Growth rate for recurring rows, inflation rate for events
    pub rate: f64,
    /// Compounding exponent
    pub years: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAudit {
    pub record: YearRecord,
    pub recurring: Vec<LineItem>,
    pub events: Vec<LineItem>,
    /// Retirement income netted off the buffered spend, if any
    pub income_offset: Option<f64>,
}

/// Explain how the record for `age` was built; None if `age` is not projected
pub fn audit_year(scenario: &Scenario, records: &[YearRecord], age: u32) -> Option<YearAudit> {
    let record = *records.iter().find(|r| r.age == age)?;

    let recurring = scenario
        .recurring
        .iter()
        .filter(|row| row.is_active_at(age))
        .map(|row| LineItem {
            label: row.label.clone(),
            amount_today: row.amount_today,
            rate: row.annual_growth,
            years: row.growth_years(age),
            value: row.amount_at(age),
        })
        .collect();

    let events = scenario
        .events
        .iter()
        .filter(|event| event.fires_at(age))
        .map(|event| LineItem {
            label: event.label.clone(),
            amount_today: event.amount_today,
            rate: event.inflation_rate,
            years: event.inflation_years(scenario.current_age),
            value: event.amount_at(age, scenario.current_age),
        })
        .collect();

    let income_offset = (age >= scenario.freedom_age && scenario.annual_retirement_income > 0.0)
        .then_some(scenario.annual_retirement_income);

    Some(YearAudit {
        record,
        recurring,
        events,
        income_offset,
    })
}

fn write_items(f: &mut fmt::Formatter<'_>, title: &str, items: &[LineItem]) -> fmt::Result {
    writeln!(f, "{title}:")?;
    if items.is_empty() {
        return writeln!(f, "  (none)");
    }
    for item in items {
        writeln!(
            f,
            "  {}: {:.0} x (1+{:.1}%)^{} = {:.0}",
            item.label,
            item.amount_today,
            item.rate * 100.0,
            item.years,
            item.value
        )?;
    }
    Ok(())
}

impl fmt::Display for YearAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.record;
        writeln!(
            f,
            "Age {} | Start: {:.0} | Contribution: {:.0} | Return: {:.0} | Spend+Buffer: {:.0} | End: {:.0}",
            r.age, r.start_corpus, r.contribution, r.investment_return, r.buffered_spend, r.end_corpus
        )?;
        write_items(f, "Recurring", &self.recurring)?;
        write_items(f, "Planned", &self.events)?;

        writeln!(
            f,
            "total = recurring + planned = {:.0} + {:.0} = {:.0}",
            r.recurring_spend, r.event_spend, r.total_spend
        )?;
        match self.income_offset {
            Some(income) => writeln!(
                f,
                "buffered = total x (1 + buffer) - retirement income {:.0} = {:.0}",
                income, r.buffered_spend
            )?,
            None => writeln!(f, "buffered = total x (1 + buffer) = {:.0}", r.buffered_spend)?,
        }
        writeln!(
            f,
            "return = (start + contribution) x {:.4}% = {:.0}",
            r.effective_rate * 100.0,
            r.investment_return
        )?;
        write!(
            f,
            "end = start + contribution + return - buffered = {:.0} + {:.0} + {:.0} - {:.0} = {:.0}",
            r.start_corpus, r.contribution, r.investment_return, r.buffered_spend, r.end_corpus
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use approx::assert_relative_eq;

    #[test]
    fn test_audit_lines_sum_to_record() {
        let scenario = Scenario::indicative();
        let records = project(&scenario, 0.0);

        for age in [40, 45, 55, 60, 70, 85] {
            let audit = audit_year(&scenario, &records, age).unwrap();
            let recurring: f64 = audit.recurring.iter().map(|i| i.value).sum();
            let events: f64 = audit.events.iter().map(|i| i.value).sum();

            assert_relative_eq!(recurring, audit.record.recurring_spend, max_relative = 1e-12);
            assert_relative_eq!(events, audit.record.event_spend, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_audit_event_year() {
        let scenario = Scenario::indicative();
        let records = project(&scenario, 0.0);
        let audit = audit_year(&scenario, &records, 45).unwrap();

        assert_eq!(audit.events.len(), 1);
        assert_eq!(audit.events[0].label, "Child Higher Education");
        assert_eq!(audit.events[0].years, 5);
        assert_eq!(audit.income_offset, None);
    }

    #[test]
    fn test_audit_income_after_freedom() {
        let scenario = Scenario::indicative();
        let records = project(&scenario, 0.0);
        let audit = audit_year(&scenario, &records, 60).unwrap();

        assert_eq!(audit.income_offset, Some(240_000.0));
        let text = audit.to_string();
        assert!(text.starts_with("Age 60"));
        assert!(text.contains("Car Replacement"));
        assert!(text.contains("retirement income 240000"));
    }

    #[test]
    fn test_audit_outside_horizon() {
        let scenario = Scenario::indicative();
        let records = project(&scenario, 0.0);
        assert!(audit_year(&scenario, &records, 30).is_none());
        assert!(audit_year(&scenario, &records, 86).is_none());
    }
}
