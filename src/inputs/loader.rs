//! Load scenarios from JSON and expense tables from CSV
//!
//! Layout of the default data directory (data/indicative/):
//! - scenario.json: scalar inputs, snake_case keys
//! - recurring.csv: Category,AmountToday,Growth,Tenure,StartAge
//! - events.csv:    Event,EventAge,AmountToday,Inflation

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::Reader;
use log::info;

use super::{OneTimeEvent, RecurringExpense, Scenario};
use crate::error::Result;

/// Default path to the indicative scenario files
pub const DEFAULT_DATA_PATH: &str = "data/indicative";

/// Raw row of recurring.csv
#[derive(Debug, serde::Deserialize)]
struct RecurringCsvRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "AmountToday")]
    amount_today: f64,
    #[serde(rename = "Growth")]
    growth: f64,
    #[serde(rename = "Tenure")]
    tenure: u32,
    #[serde(rename = "StartAge")]
    start_age: u32,
}

impl From<RecurringCsvRow> for RecurringExpense {
    fn from(row: RecurringCsvRow) -> Self {
        RecurringExpense::new(row.category, row.amount_today, row.growth, row.start_age, row.tenure)
    }
}

/// Raw row of events.csv
#[derive(Debug, serde::Deserialize)]
struct EventCsvRow {
    #[serde(rename = "Event")]
    event: String,
    #[serde(rename = "EventAge")]
    event_age: u32,
    #[serde(rename = "AmountToday")]
    amount_today: f64,
    #[serde(rename = "Inflation")]
    inflation: f64,
}

impl From<EventCsvRow> for OneTimeEvent {
    fn from(row: EventCsvRow) -> Self {
        OneTimeEvent::new(row.event, row.event_age, row.amount_today, row.inflation)
    }
}

/// Parse a scenario from JSON; absent keys take the indicative defaults
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<Scenario> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_scenario_json<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let file = File::open(path)?;
    load_scenario_from_reader(BufReader::new(file))
}

pub fn load_recurring_from_reader<R: Read>(reader: R) -> Result<Vec<RecurringExpense>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: RecurringCsvRow = result?;
        rows.push(row.into());
    }

    Ok(rows)
}

pub fn load_recurring<P: AsRef<Path>>(path: P) -> Result<Vec<RecurringExpense>> {
    let file = File::open(path)?;
    load_recurring_from_reader(file)
}

pub fn load_events_from_reader<R: Read>(reader: R) -> Result<Vec<OneTimeEvent>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EventCsvRow = result?;
        events.push(row.into());
    }

    Ok(events)
}

pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<OneTimeEvent>> {
    let file = File::open(path)?;
    load_events_from_reader(file)
}

/// The set of files a scenario is assembled from.
///
/// Each part is optional: with no JSON the indicative scalars are used, and a
/// CSV table, when given, replaces the collection from the JSON.
#[derive(Debug, Clone, Default)]
pub struct ScenarioFiles {
    pub scenario: Option<PathBuf>,
    pub recurring: Option<PathBuf>,
    pub events: Option<PathBuf>,
}

impl ScenarioFiles {
    /// Files of a data directory laid out like data/indicative/
    pub fn in_dir(dir: &Path) -> Self {
        let existing = |name: &str| {
            let path = dir.join(name);
            path.exists().then_some(path)
        };
        Self {
            scenario: existing("scenario.json"),
            recurring: existing("recurring.csv"),
            events: existing("events.csv"),
        }
    }

    /// Load and validate the scenario
    pub fn load(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => load_scenario_json(path)?,
            None => Scenario::indicative(),
        };

        if let Some(path) = &self.recurring {
            scenario.recurring = load_recurring(path)?;
        }
        if let Some(path) = &self.events {
            scenario.events = load_events(path)?;
        }

        scenario.validate()?;

        info!(
            "Loaded scenario: ages {}-{}-{}, {} recurring rows, {} events",
            scenario.current_age,
            scenario.freedom_age,
            scenario.life_age,
            scenario.recurring.len(),
            scenario.events.len()
        );

        Ok(scenario)
    }
}

/// Load the scenario from the default data directory
pub fn load_default_scenario() -> Result<Scenario> {
    ScenarioFiles::in_dir(Path::new(DEFAULT_DATA_PATH)).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "current_age": 35, "stress_enabled": true }"#;
        let scenario = load_scenario_from_reader(json.as_bytes()).unwrap();

        assert_eq!(scenario.current_age, 35);
        assert!(scenario.stress_enabled);
        // Everything else comes from the indicative household
        assert_eq!(scenario.freedom_age, 55);
        assert_relative_eq!(scenario.expense_ratio, 0.0075);
        assert_eq!(scenario.recurring.len(), 7);
    }

    #[test]
    fn test_json_with_collections() {
        let json = r#"{
            "recurring": [
                { "label": "Rent", "amount_today": 300000.0, "annual_growth": 0.05,
                  "start_age": 40, "active_years": 999 }
            ],
            "events": []
        }"#;
        let scenario = load_scenario_from_reader(json.as_bytes()).unwrap();

        assert_eq!(scenario.recurring.len(), 1);
        assert_eq!(scenario.recurring[0].label, "Rent");
        assert!(scenario.events.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let result = load_scenario_from_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(PlanError::Json(_))));
    }

    #[test]
    fn test_load_recurring_csv() {
        let data = "\
Category,AmountToday,Growth,Tenure,StartAge
Housing & Utilities,360000,0.05,45,40
Parents Support,120000,0.06,10,40
";
        let rows = load_recurring_from_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Housing & Utilities");
        assert_eq!(rows[0].active_years, 45);
        assert_eq!(rows[1].start_age, 40);
        assert_relative_eq!(rows[1].annual_growth, 0.06);
    }

    #[test]
    fn test_load_events_csv() {
        let data = "\
Event,EventAge,AmountToday,Inflation
Car Replacement,60,2000000,0.05
";
        let events = load_events_from_reader(data.as_bytes()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].trigger_age, 60);
        assert_relative_eq!(events[0].inflation_rate, 0.05);
    }

    #[test]
    fn test_bad_csv_value() {
        let data = "\
Event,EventAge,AmountToday,Inflation
Car Replacement,sixty,2000000,0.05
";
        let result = load_events_from_reader(data.as_bytes());
        assert!(matches!(result, Err(PlanError::Csv(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_scenario_json("does/not/exist.json");
        assert!(matches!(result, Err(PlanError::Io(_))));
    }

    #[test]
    fn test_load_default_scenario() {
        let result = load_default_scenario();
        assert!(result.is_ok(), "Failed to load scenario: {:?}", result.err());

        let scenario = result.unwrap();
        let indicative = Scenario::indicative();
        assert_eq!(scenario.current_age, indicative.current_age);
        assert_eq!(scenario.recurring, indicative.recurring);
        assert_eq!(scenario.events, indicative.events);
    }

    #[test]
    fn test_no_files_gives_indicative() {
        let scenario = ScenarioFiles::default().load().unwrap();
        assert_eq!(scenario, Scenario::indicative());
    }
}
