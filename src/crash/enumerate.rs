// src/crash/enumerate.rs

//! Lazy enumeration of crash scenarios.
//!
//! For `n` tasks there are `2^n - 1` non-empty subsets and each one costs a
//! full schedule recomputation, so the enumeration is `O(2^n * n)`. That is
//! cheap for textbook networks (n = 8 is 255 scenarios) but only tractable
//! up to roughly n = 20..25; beyond that a pruning or dynamic-programming
//! approach is needed. [`MAX_CRASH_TASKS`] is the hard cap imposed by the
//! bitmask representation; practical limits should be enforced lower via
//! `[config] max_subset_tasks`.

use crate::errors::{CrashdagError, Result};
use crate::plan::Plan;
use crate::schedule::{CrashSelection, Schedule};
use crate::types::{Cost, TaskName};

/// Hard upper bound on task count for subset enumeration (bitmask width).
pub const MAX_CRASH_TASKS: usize = 63;

/// Outcome of one crash scenario: which tasks were accelerated and what the
/// resulting schedule looks like relative to the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashPlan {
    /// Accelerated task names, in stable graph order.
    pub speed_up_tasks: Vec<TaskName>,
    /// Baseline total duration minus this scenario's total duration.
    pub save_duration: f64,
    /// This scenario's total cost minus the baseline total cost.
    pub extra_cost: Cost,
    pub total_duration: f64,
    pub total_cost: Cost,
    pub critical_path: Vec<TaskName>,
}

/// A scenario whose schedule computation failed. Failures are isolated per
/// subset; they never abort the enumeration.
#[derive(Debug)]
pub struct ScenarioFailure {
    pub speed_up_tasks: Vec<TaskName>,
    pub error: CrashdagError,
}

/// Lazy iterator over all non-empty crash subsets of a plan's task graph.
///
/// Subsets are encoded as a bitmask counter over the graph's stable task
/// order, which makes the sequence finite, deterministic and restartable:
/// [`CrashPlans::position`] names the next subset and
/// [`CrashPlans::resume`] continues from it. Scenarios share no mutable
/// state, so a consumer is free to fan evaluation out before merging.
pub struct CrashPlans<'a> {
    plan: &'a Plan,
    next_mask: u64,
    last_mask: u64,
}

impl<'a> CrashPlans<'a> {
    pub fn new(plan: &'a Plan) -> Result<Self> {
        Self::resume(plan, 1)
    }

    /// Continue enumeration from a previously recorded position.
    pub fn resume(plan: &'a Plan, next_mask: u64) -> Result<Self> {
        let n = plan.graph().len();
        if n > MAX_CRASH_TASKS {
            return Err(CrashdagError::TooManyTasks {
                count: n,
                limit: MAX_CRASH_TASKS,
            });
        }
        let last_mask = if n == 0 { 0 } else { (1u64 << n) - 1 };
        Ok(Self {
            plan,
            next_mask: next_mask.max(1),
            last_mask,
        })
    }

    /// Bitmask of the next subset to be produced.
    pub fn position(&self) -> u64 {
        self.next_mask
    }

    /// Total number of scenarios in the full sequence.
    pub fn scenario_count(&self) -> u64 {
        self.last_mask
    }

    fn subset_names(&self, mask: u64) -> Vec<TaskName> {
        self.plan
            .graph()
            .names()
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1u64 << i) != 0)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

impl Iterator for CrashPlans<'_> {
    type Item = std::result::Result<CrashPlan, ScenarioFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_mask > self.last_mask {
            return None;
        }
        let mask = self.next_mask;
        self.next_mask += 1;

        let speed_up_tasks = self.subset_names(mask);
        let selection = CrashSelection::of(speed_up_tasks.iter().cloned());

        match Schedule::compute(self.plan.graph(), &selection) {
            Ok(schedule) => Some(Ok(plan_row(self.plan, speed_up_tasks, &schedule))),
            Err(error) => Some(Err(ScenarioFailure {
                speed_up_tasks,
                error,
            })),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.last_mask.saturating_sub(self.next_mask - 1) as usize;
        (remaining, Some(remaining))
    }
}

fn plan_row(plan: &Plan, speed_up_tasks: Vec<TaskName>, schedule: &Schedule) -> CrashPlan {
    CrashPlan {
        speed_up_tasks,
        save_duration: plan.total_duration() - schedule.total_duration(),
        extra_cost: schedule.total_cost() - plan.total_cost(),
        total_duration: schedule.total_duration(),
        total_cost: schedule.total_cost(),
        critical_path: schedule.critical_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Task, TaskGraph};
    use crate::types::Cost;

    fn chain_plan() -> Plan {
        let graph = TaskGraph::new(vec![
            Task::new("A", 4.0, Cost::from_units(100), 3.0, Cost::from_units(150), vec![]).unwrap(),
            Task::new(
                "B",
                2.0,
                Cost::from_units(50),
                1.0,
                Cost::from_units(90),
                vec!["A".into()],
            )
            .unwrap(),
        ])
        .unwrap();
        Plan::new(graph).unwrap()
    }

    #[test]
    fn enumerates_every_non_empty_subset_once() {
        let plan = chain_plan();
        let plans = CrashPlans::new(&plan).unwrap();
        assert_eq!(plans.scenario_count(), 3);

        let rows: Vec<_> = plans.map(|r| r.unwrap()).collect();
        let subsets: Vec<Vec<String>> = rows.iter().map(|r| r.speed_up_tasks.clone()).collect();
        assert_eq!(
            subsets,
            vec![
                vec!["A".to_string()],
                vec!["B".to_string()],
                vec!["A".to_string(), "B".to_string()],
            ]
        );
    }

    #[test]
    fn rows_measure_against_the_baseline() {
        let plan = chain_plan();
        let rows: Vec<_> = CrashPlans::new(&plan)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        // Subset {A}: duration 6 -> 5, cost 150 -> 200.
        assert_eq!(rows[0].save_duration, 1.0);
        assert_eq!(rows[0].extra_cost, Cost::from_units(50));
        // Subset {A, B}: duration 6 -> 4, extra cost 50 + 40.
        assert_eq!(rows[2].save_duration, 2.0);
        assert_eq!(rows[2].extra_cost, Cost::from_units(90));
        assert_eq!(rows[2].total_cost, Cost::from_units(240));
    }

    #[test]
    fn resume_continues_where_position_left_off() {
        let plan = chain_plan();
        let mut first = CrashPlans::new(&plan).unwrap();
        let head = first.next().unwrap().unwrap();
        let pos = first.position();

        let tail: Vec<_> = CrashPlans::resume(&plan, pos)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(head.speed_up_tasks, vec!["A".to_string()]);
        assert_eq!(tail.len(), 2);
    }

    #[test]
    fn empty_graph_yields_no_scenarios() {
        let plan = Plan::new(TaskGraph::new(vec![]).unwrap()).unwrap();
        let mut plans = CrashPlans::new(&plan).unwrap();
        assert_eq!(plans.scenario_count(), 0);
        assert!(plans.next().is_none());
    }
}
