// src/schedule/schedule.rs

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::errors::Result;
use crate::graph::{Task, TaskGraph};
use crate::schedule::passes;
use crate::types::{Cost, TaskName};

/// Per-scenario overlay naming the tasks evaluated at their accelerated
/// duration/cost pair.
///
/// A scenario is `(graph, selection)`; the shared graph is never mutated, so
/// scenarios are independent by construction and can be evaluated in any
/// order (or concurrently) without copying the task table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrashSelection {
    crashed: BTreeSet<TaskName>,
}

impl CrashSelection {
    /// Baseline scenario: nothing accelerated.
    pub fn none() -> Self {
        Self::default()
    }

    /// Accelerate a single task.
    pub fn single(name: impl Into<TaskName>) -> Self {
        let mut crashed = BTreeSet::new();
        crashed.insert(name.into());
        Self { crashed }
    }

    /// Accelerate the given set of tasks.
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskName>,
    {
        Self {
            crashed: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Accelerate every task in the graph (the minimum-duration scenario).
    pub fn all(graph: &TaskGraph) -> Self {
        Self::of(graph.names().iter().cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.crashed.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.crashed.contains(name)
    }

    /// Duration the scenario uses for this task.
    pub fn active_duration(&self, task: &Task) -> f64 {
        if self.contains(&task.name) {
            task.speed_up_duration
        } else {
            task.duration
        }
    }

    /// Cost the scenario pays for this task.
    pub fn active_cost(&self, task: &Task) -> Cost {
        if self.contains(&task.name) {
            task.speed_up_cost
        } else {
            task.cost
        }
    }
}

/// Fully annotated schedule entry for one task in one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub name: TaskName,
    pub es: f64,
    pub ef: f64,
    pub ls: f64,
    pub lf: f64,
    /// Total float: slack without delaying the project.
    pub tf: f64,
    /// Free float: slack without delaying any immediate successor.
    pub ff: f64,
    pub is_critical: bool,
    pub active_duration: f64,
    pub active_cost: Cost,
}

/// Result of running the full pipeline (forward pass, backward pass, slack)
/// over one `(graph, selection)` scenario.
///
/// Rows are kept in the graph's stable positional order. Recomputing over
/// the same inputs yields identical rows; nothing here mutates the graph.
#[derive(Debug, Clone)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
    index: HashMap<TaskName, usize>,
    total_duration: f64,
    total_cost: Cost,
}

impl Schedule {
    /// Run the three scheduling stages in sequence.
    ///
    /// An empty graph yields the degenerate schedule: no rows, total
    /// duration 0, total cost 0, empty critical path.
    pub fn compute(graph: &TaskGraph, selection: &CrashSelection) -> Result<Schedule> {
        let mut rows: Vec<ScheduleRow> = graph
            .tasks()
            .map(|task| ScheduleRow {
                name: task.name.clone(),
                es: 0.0,
                ef: 0.0,
                ls: 0.0,
                lf: 0.0,
                tf: 0.0,
                ff: 0.0,
                is_critical: false,
                active_duration: selection.active_duration(task),
                active_cost: selection.active_cost(task),
            })
            .collect();
        let index: HashMap<TaskName, usize> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.name.clone(), i))
            .collect();

        passes::forward_pass(graph, &index, &mut rows)?;
        passes::backward_pass(graph, &index, &mut rows);
        passes::derive_slack(graph, &index, &mut rows);

        let total_duration = rows.iter().map(|r| r.ef).fold(0.0, f64::max);
        let total_cost: Cost = rows.iter().map(|r| r.active_cost).sum();

        debug!(
            total_duration,
            total_cost = %total_cost,
            crashed = selection.crashed.len(),
            "scenario scheduled"
        );

        Ok(Schedule {
            rows,
            index,
            total_duration,
            total_cost,
        })
    }

    /// Project duration: the latest Early Finish over all tasks.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Project cost: the sum of every task's active cost.
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Option<&ScheduleRow> {
        self.index.get(name).map(|&i| &self.rows[i])
    }

    /// Names of zero-float tasks, in stable graph order.
    pub fn critical_path(&self) -> Vec<TaskName> {
        self.rows
            .iter()
            .filter(|r| r.is_critical)
            .map(|r| r.name.clone())
            .collect()
    }

    /// Full rows for the zero-float tasks.
    pub fn critical_rows(&self) -> Vec<&ScheduleRow> {
        self.rows.iter().filter(|r| r.is_critical).collect()
    }
}
