//! CSV export of a projection

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::projection::YearRecord;

#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Contribution")]
    contribution: f64,
    #[serde(rename = "Regular")]
    regular: f64,
    #[serde(rename = "Planned")]
    planned: f64,
    #[serde(rename = "Total")]
    total: f64,
    #[serde(rename = "Buffer")]
    buffer: f64,
    #[serde(rename = "StartCorpus")]
    start_corpus: f64,
    #[serde(rename = "Return")]
    investment_return: f64,
    #[serde(rename = "EndCorpus")]
    end_corpus: f64,
}

impl From<&YearRecord> for CsvRow {
    fn from(r: &YearRecord) -> Self {
        Self {
            age: r.age,
            contribution: r.contribution,
            regular: r.recurring_spend,
            planned: r.event_spend,
            total: r.total_spend,
            buffer: r.buffered_spend,
            start_corpus: r.start_corpus,
            investment_return: r.investment_return,
            end_corpus: r.end_corpus,
        }
    }
}

/// Write one CSV row per year, oldest first as given
pub fn write_projection_csv<W: Write>(writer: W, records: &[YearRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(CsvRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_projection_csv_file<P: AsRef<Path>>(path: P, records: &[YearRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_projection_csv(file, records)
}
