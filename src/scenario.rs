//! Scenario runner for solve-then-project runs and sensitivity sweeps
//!
//! Holds a base scenario and goal-seek settings, then runs one scenario or
//! many variants of it. Variants are independent, so batches fan out over
//! rayon's thread pool.

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::inputs::{LongevityPreset, Scenario};
use crate::projection::{
    project, solve_with, GoalSeekConfig, GoalSeekOutcome, ProjectionSummary, YearRecord,
};
use crate::report::PlanMetrics;

/// Everything produced for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub outcome: GoalSeekOutcome,
    /// Projection at the solved lump sum, or with no lump sum if unsolvable
    pub records: Vec<YearRecord>,
    pub summary: ProjectionSummary,
    pub metrics: PlanMetrics,
}

/// One cell of a longevity x stress sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub longevity: LongevityPreset,
    pub stress_enabled: bool,
    pub result: PlanResult,
}

#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_scenario: Scenario,
    config: GoalSeekConfig,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            base_scenario: scenario,
            config: GoalSeekConfig::default(),
        }
    }

    pub fn with_config(scenario: Scenario, config: GoalSeekConfig) -> Self {
        Self {
            base_scenario: scenario,
            config,
        }
    }

    /// Solve and project the base scenario
    pub fn run(&self) -> PlanResult {
        self.run_scenario(&self.base_scenario)
    }

    /// Solve and project an arbitrary scenario with this runner's settings
    pub fn run_scenario(&self, scenario: &Scenario) -> PlanResult {
        let outcome = solve_with(scenario, self.config);
        let records = project(scenario, outcome.lump_sum().unwrap_or(0.0));
        let summary = ProjectionSummary::from_records(&records);
        let metrics = PlanMetrics::compute(scenario, &records, &outcome);

        PlanResult {
            outcome,
            records,
            summary,
            metrics,
        }
    }

    /// Run many scenarios in parallel; results keep the input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<PlanResult> {
        info!("Running batch of {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect()
    }

    /// Every longevity preset, with and without stress.
    ///
    /// Presets that leave the variant invalid (e.g. a life age before the
    /// freedom age) are skipped rather than solved.
    pub fn sweep(&self) -> Vec<SweepPoint> {
        let presets = LongevityPreset::ALL.iter().filter(|preset| {
            match self.base_scenario.with_longevity(**preset).validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping life age {} in sweep: {e}", preset.life_age());
                    false
                }
            }
        });
        let grid: Vec<(LongevityPreset, bool)> = presets
            .flat_map(|&preset| [(preset, false), (preset, true)])
            .collect();
        let scenarios: Vec<Scenario> = grid
            .iter()
            .map(|&(preset, stress)| self.base_scenario.with_longevity(preset).with_stress(stress))
            .collect();

        self.run_batch(&scenarios)
            .into_iter()
            .zip(grid)
            .map(|(result, (longevity, stress_enabled))| SweepPoint {
                longevity,
                stress_enabled,
                result,
            })
            .collect()
    }

    pub fn scenario(&self) -> &Scenario {
        &self.base_scenario
    }

    pub fn scenario_mut(&mut self) -> &mut Scenario {
        &mut self.base_scenario
    }

    pub fn config(&self) -> GoalSeekConfig {
        self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(Scenario::indicative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_uses_solved_lump_sum() {
        let runner = ScenarioRunner::default();
        let result = runner.run();

        let lump = result.outcome.lump_sum().unwrap();
        assert_eq!(result.records[0].start_corpus, lump + runner.scenario().current_corpus);
        assert!(result.summary.final_corpus.abs() <= 1.0);
        assert_eq!(result.metrics.required_lump_sum, Some(lump));
    }

    #[test]
    fn test_unsolvable_scenario_projects_without_lump_sum() {
        let scenario = Scenario {
            nominal_return: -0.9,
            ..Scenario::indicative()
        };
        let result = ScenarioRunner::new(scenario.clone()).run();

        assert_eq!(result.outcome.lump_sum(), None);
        assert_eq!(result.records, project(&scenario, 0.0));
    }

    #[test]
    fn test_batch_keeps_order() {
        let runner = ScenarioRunner::default();
        let scenarios: Vec<Scenario> = [85, 90, 95]
            .iter()
            .map(|&age| runner.scenario().with_life_age(age))
            .collect();

        let results = runner.run_batch(&scenarios);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].records.last().unwrap().age, 85);
        assert_eq!(results[1].records.last().unwrap().age, 90);
        assert_eq!(results[2].records.last().unwrap().age, 95);

        // Living longer needs more money today
        let lumps: Vec<f64> = results.iter().map(|r| r.outcome.lump_sum().unwrap()).collect();
        assert!(lumps[0] < lumps[1]);
        assert!(lumps[1] < lumps[2]);
    }

    #[test]
    fn test_sweep_grid() {
        let runner = ScenarioRunner::default();
        let points = runner.sweep();

        assert_eq!(points.len(), 6);
        for pair in points.chunks(2) {
            assert_eq!(pair[0].longevity, pair[1].longevity);
            assert!(!pair[0].stress_enabled);
            assert!(pair[1].stress_enabled);

            let calm = pair[0].result.outcome.lump_sum().unwrap();
            let bear = pair[1].result.outcome.lump_sum().unwrap();
            assert!(bear > calm);
        }
    }

    #[test]
    fn test_sweep_skips_presets_before_freedom_age() {
        let base = Scenario {
            freedom_age: 88,
            life_age: 95,
            ..Scenario::indicative()
        };
        assert!(base.validate().is_ok());

        let points = ScenarioRunner::new(base).sweep();

        assert_eq!(points.len(), 4);
        assert!(points
            .iter()
            .all(|p| p.longevity != LongevityPreset::Age85));
        for p in &points {
            assert!(p.longevity.life_age() >= 88);
            assert_eq!(p.result.records.last().unwrap().age, p.longevity.life_age());
        }
    }

    #[test]
    fn test_sweep_of_invalid_base_is_empty() {
        let base = Scenario {
            nominal_return: f64::NAN,
            ..Scenario::indicative()
        };
        assert!(ScenarioRunner::new(base).sweep().is_empty());
    }

    #[test]
    fn test_custom_config_is_used() {
        let config = GoalSeekConfig {
            target_end_corpus: 1_000_000.0,
            ..GoalSeekConfig::default()
        };
        let runner = ScenarioRunner::with_config(Scenario::indicative(), config);
        let result = runner.run();

        assert!((result.summary.final_corpus - 1_000_000.0).abs() <= 1.0);
        assert_eq!(runner.config(), config);
    }
}
