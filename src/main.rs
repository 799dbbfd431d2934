//! FreedomNumber CLI
//!
//! Command-line interface for projecting a retirement corpus and solving for
//! the extra lump sum needed today

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use freedom_number::inputs::ScenarioFiles;
use freedom_number::projection::{project, GoalSeekConfig, GoalSeekOutcome, YearRecord};
use freedom_number::report::{audit_year, write_projection_csv_file, PlanMetrics};
use freedom_number::{LongevityPreset, Scenario, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "freedom-number", version, about = "Retirement corpus projection and lump-sum goal-seek")]
struct Cli {
    /// Directory laid out like data/indicative/ (scenario.json, recurring.csv, events.csv)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Scenario JSON; missing keys use the indicative defaults
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,

    /// Recurring expenses CSV (Category,AmountToday,Growth,Tenure,StartAge)
    #[arg(long, global = true)]
    recurring: Option<PathBuf>,

    /// One-time events CSV (Event,EventAge,AmountToday,Inflation)
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    /// Longevity preset overriding life_age: 85, 90 or 95
    #[arg(long, global = true)]
    life: Option<u32>,

    /// Apply the bear-market stress for the first decade of freedom
    #[arg(long, global = true)]
    stress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the year-by-year projection
    Project {
        /// Extra lump sum today; defaults to the solved amount
        #[arg(long)]
        lump: Option<f64>,

        /// Also write the full projection to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Solve for the extra lump sum and print headline metrics
    Solve {
        #[arg(long, default_value_t = 0.0)]
        target: f64,

        #[arg(long, default_value_t = 1.0)]
        tolerance: f64,

        #[arg(long)]
        json: bool,
    },
    /// Explain how one year of the solved projection was computed
    Audit {
        #[arg(long)]
        age: u32,
    },
    /// Longevity presets x stress on/off
    Sweep {
        #[arg(long)]
        json: bool,
    },
}

fn load_scenario(cli: &Cli) -> Result<Scenario> {
    let mut files = match &cli.data_dir {
        Some(dir) => ScenarioFiles::in_dir(dir),
        None => ScenarioFiles::default(),
    };
    if cli.scenario.is_some() {
        files.scenario = cli.scenario.clone();
    }
    if cli.recurring.is_some() {
        files.recurring = cli.recurring.clone();
    }
    if cli.events.is_some() {
        files.events = cli.events.clone();
    }

    let mut scenario = files.load().context("Failed to load scenario")?;

    if let Some(age) = cli.life {
        scenario = scenario.with_longevity(LongevityPreset::from_age(age)?);
    }
    if cli.stress {
        scenario.stress_enabled = true;
    }
    scenario.validate()?;

    Ok(scenario)
}

fn solved_lump(outcome: &GoalSeekOutcome) -> f64 {
    match outcome.lump_sum() {
        Some(lump) => lump,
        None => {
            println!("No lump sum within the search range reaches the target; projecting with none.");
            0.0
        }
    }
}

fn print_projection(records: &[YearRecord]) {
    println!(
        "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>16} {:>14} {:>16}",
        "Age", "Contribution", "Regular", "Planned", "Total", "Buffered", "StartCorpus", "Return", "EndCorpus"
    );
    println!("{}", "-".repeat(130));

    for r in records {
        println!(
            "{:>4} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>16.0} {:>14.0} {:>16.0}",
            r.age,
            r.contribution,
            r.recurring_spend,
            r.event_spend,
            r.total_spend,
            r.buffered_spend,
            r.start_corpus,
            r.investment_return,
            r.end_corpus,
        );
    }
}

fn print_metrics(metrics: &PlanMetrics, outcome: &GoalSeekOutcome) {
    let money = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.0}"));
    let percent = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v * 100.0));

    println!("Extra lump sum needed today: {}", money(metrics.required_lump_sum));
    match outcome {
        GoalSeekOutcome::Converged { iterations, .. } => {
            println!("  (converged in {iterations} iterations)")
        }
        GoalSeekOutcome::BestEffort { .. } => println!("  (best effort, tolerance not met)"),
        GoalSeekOutcome::NotFound { .. } => println!("  (no feasible funding level)"),
    }
    println!("Annual spend today:          {:.0}", metrics.annual_spend_today);
    println!("Spend x 40:                  {:.0}", metrics.capital_rule_of_thumb);
    println!("Peak corpus:                 {}", money(metrics.peak_corpus));
    println!("Implied withdrawal rate:     {}", percent(metrics.implied_withdrawal_rate));
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let scenario = load_scenario(&cli)?;

    match &cli.command {
        Command::Project { lump, output } => {
            let (lump, records) = match lump {
                Some(lump) => (*lump, project(&scenario, *lump)),
                None => {
                    let result = ScenarioRunner::new(scenario.clone()).run();
                    (solved_lump(&result.outcome), result.records)
                }
            };

            println!("Projection with extra lump sum {lump:.0} ({} years):", records.len());
            print_projection(&records);

            if let Some(path) = output {
                write_projection_csv_file(path, &records)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Projection written to {}", path.display());
                println!("\nFull results written to: {}", path.display());
            }
        }
        Command::Solve {
            target,
            tolerance,
            json,
        } => {
            if !tolerance.is_finite() || *tolerance <= 0.0 {
                bail!("tolerance must be > 0");
            }
            let config = GoalSeekConfig {
                target_end_corpus: *target,
                tolerance: *tolerance,
                ..GoalSeekConfig::default()
            };
            let result = ScenarioRunner::with_config(scenario.clone(), config).run();

            if *json {
                let body = serde_json::json!({
                    "outcome": result.outcome,
                    "metrics": result.metrics,
                    "summary": result.summary,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_metrics(&result.metrics, &result.outcome);
            }
        }
        Command::Audit { age } => {
            let result = ScenarioRunner::new(scenario.clone()).run();
            solved_lump(&result.outcome);
            match audit_year(&scenario, &result.records, *age) {
                Some(audit) => println!("{audit}"),
                None => bail!(
                    "Age {age} is outside the projection ({}-{})",
                    scenario.current_age,
                    scenario.life_age
                ),
            }
        }
        Command::Sweep { json } => {
            let points = ScenarioRunner::new(scenario).sweep();

            if *json {
                let rows: Vec<_> = points
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "life_age": p.longevity.life_age(),
                            "stress_enabled": p.stress_enabled,
                            "outcome": p.result.outcome,
                            "metrics": p.result.metrics,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:>5} {:>7} {:>18} {:>18} {:>10}", "Life", "Stress", "LumpSum", "PeakCorpus", "SWR");
                println!("{}", "-".repeat(62));
                for p in &points {
                    let m = &p.result.metrics;
                    println!(
                        "{:>5} {:>7} {:>18} {:>18} {:>10}",
                        p.longevity.life_age(),
                        if p.stress_enabled { "bear" } else { "off" },
                        m.required_lump_sum.map_or("-".to_string(), |v| format!("{v:.0}")),
                        m.peak_corpus.map_or("-".to_string(), |v| format!("{v:.0}")),
                        m.implied_withdrawal_rate
                            .map_or("-".to_string(), |v| format!("{:.1}%", v * 100.0)),
                    );
                }
            }
        }
    }

    Ok(())
}
