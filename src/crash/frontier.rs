// src/crash/frontier.rs

//! Minimum-cost plan selection over the enumerated scenarios.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::crash::enumerate::{CrashPlan, CrashPlans, ScenarioFailure};
use crate::errors::Result;
use crate::plan::Plan;

/// The time-cost tradeoff frontier plus any scenarios that failed to
/// schedule (kept separate so one bad subset never hides the rest).
#[derive(Debug, Default)]
pub struct CrashAnalysis {
    /// For each achievable positive duration saving, the cheapest subset(s),
    /// ascending by saving. Ties on minimum extra cost are all kept.
    pub frontier: Vec<CrashPlan>,
    pub failures: Vec<ScenarioFailure>,
}

/// Total-order key for grouping scenarios by achieved saving.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SavingKey(f64);

impl Eq for SavingKey {}

impl PartialOrd for SavingKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SavingKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Enumerate every crash scenario of `plan` and reduce to the non-dominated
/// (saving, cost) frontier.
///
/// Scenarios whose achieved saving is zero are the no-op case and are
/// dropped. Within each distinct positive saving the subset(s) with the
/// minimum `extra_cost` are kept -- all of them when several tie.
pub fn min_cost_frontier(plan: &Plan) -> Result<CrashAnalysis> {
    let plans = CrashPlans::new(plan)?;
    debug!(scenarios = plans.scenario_count(), "enumerating crash plans");

    let mut groups: BTreeMap<SavingKey, Vec<CrashPlan>> = BTreeMap::new();
    let mut failures = Vec::new();

    for item in plans {
        let row = match item {
            Ok(row) => row,
            Err(failure) => {
                warn!(
                    subset = ?failure.speed_up_tasks,
                    error = %failure.error,
                    "crash scenario failed; continuing"
                );
                failures.push(failure);
                continue;
            }
        };

        if row.save_duration == 0.0 {
            continue;
        }

        let group = groups.entry(SavingKey(row.save_duration)).or_default();
        match group.first() {
            None => group.push(row),
            Some(best) => {
                if row.extra_cost < best.extra_cost {
                    group.clear();
                    group.push(row);
                } else if row.extra_cost == best.extra_cost {
                    group.push(row);
                }
            }
        }
    }

    let frontier: Vec<CrashPlan> = groups.into_values().flatten().collect();
    debug!(rows = frontier.len(), failed = failures.len(), "frontier selected");

    Ok(CrashAnalysis { frontier, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Task, TaskGraph};
    use crate::types::Cost;

    fn task(
        name: &str,
        duration: f64,
        cost: i64,
        speed_up: f64,
        speed_up_cost: i64,
        preds: &[&str],
    ) -> Task {
        Task::new(
            name,
            duration,
            Cost::from_units(cost),
            speed_up,
            Cost::from_units(speed_up_cost),
            preds.iter().map(|p| p.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn frontier_keeps_cheapest_subset_per_saving() {
        // Chain A -> B; crashing either saves 1 but A is cheaper.
        let graph = TaskGraph::new(vec![
            task("A", 4.0, 100, 3.0, 120, &[]),
            task("B", 2.0, 100, 1.0, 150, &["A"]),
        ])
        .unwrap();
        let plan = Plan::new(graph).unwrap();

        let analysis = min_cost_frontier(&plan).unwrap();
        assert!(analysis.failures.is_empty());

        let savings: Vec<f64> = analysis.frontier.iter().map(|r| r.save_duration).collect();
        assert_eq!(savings, vec![1.0, 2.0]);

        // Saving 1: {A} at +20 beats {B} at +50.
        assert_eq!(analysis.frontier[0].speed_up_tasks, vec!["A".to_string()]);
        assert_eq!(analysis.frontier[0].extra_cost, Cost::from_units(20));
        // Saving 2 requires both.
        assert_eq!(analysis.frontier[1].extra_cost, Cost::from_units(70));
    }

    #[test]
    fn ties_on_minimum_cost_are_all_returned() {
        // Chain with two identically-priced crash options: {A} and {B} both
        // save 1 for +30.
        let graph = TaskGraph::new(vec![
            task("A", 4.0, 100, 3.0, 130, &[]),
            task("B", 2.0, 100, 1.0, 130, &["A"]),
        ])
        .unwrap();
        let plan = Plan::new(graph).unwrap();

        let analysis = min_cost_frontier(&plan).unwrap();
        let saving_one: Vec<_> = analysis
            .frontier
            .iter()
            .filter(|r| r.save_duration == 1.0)
            .collect();
        assert_eq!(saving_one.len(), 2);
        assert!(saving_one.iter().all(|r| r.extra_cost == Cost::from_units(30)));
    }

    #[test]
    fn zero_saving_scenarios_are_dropped() {
        // B is off-critical; crashing it alone saves nothing.
        let graph = TaskGraph::new(vec![
            task("A", 4.0, 100, 3.0, 120, &[]),
            task("B", 1.0, 100, 0.5, 110, &[]),
        ])
        .unwrap();
        let plan = Plan::new(graph).unwrap();

        let analysis = min_cost_frontier(&plan).unwrap();
        assert!(analysis.frontier.iter().all(|r| r.save_duration > 0.0));
    }
}
