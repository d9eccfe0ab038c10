// src/plan.rs

//! Plan orchestration: the baseline schedule plus per-task crash leverage.

use std::collections::HashMap;

use tracing::info;

use crate::errors::Result;
use crate::graph::TaskGraph;
use crate::schedule::{CrashSelection, Schedule, ScheduleRow};
use crate::types::{Cost, TaskName};

/// A scheduled project: the task graph, its baseline schedule, and for each
/// task the project-level saving achievable by accelerating that task alone
/// (`speed_up_can_save`).
///
/// The per-task savings quantify individual leverage only; crash analysis
/// explores combinations afresh and does not consume them.
#[derive(Debug, Clone)]
pub struct Plan {
    graph: TaskGraph,
    baseline: Schedule,
    can_save: HashMap<TaskName, f64>,
}

impl Plan {
    pub fn new(graph: TaskGraph) -> Result<Self> {
        let baseline = Schedule::compute(&graph, &CrashSelection::none())?;

        let mut can_save = HashMap::with_capacity(graph.len());
        for name in graph.names() {
            let scenario = Schedule::compute(&graph, &CrashSelection::single(name.clone()))?;
            can_save.insert(
                name.clone(),
                baseline.total_duration() - scenario.total_duration(),
            );
        }

        info!(
            tasks = graph.len(),
            total_duration = baseline.total_duration(),
            total_cost = %baseline.total_cost(),
            "baseline schedule computed"
        );

        Ok(Self {
            graph,
            baseline,
            can_save,
        })
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn baseline(&self) -> &Schedule {
        &self.baseline
    }

    pub fn total_duration(&self) -> f64 {
        self.baseline.total_duration()
    }

    pub fn total_cost(&self) -> Cost {
        self.baseline.total_cost()
    }

    pub fn critical_path(&self) -> Vec<TaskName> {
        self.baseline.critical_path()
    }

    pub fn critical_rows(&self) -> Vec<&ScheduleRow> {
        self.baseline.critical_rows()
    }

    /// Project-duration saving from accelerating only this task.
    pub fn speed_up_can_save(&self, name: &str) -> Option<f64> {
        self.can_save.get(name).copied()
    }

    /// `(name, local saving, project saving)` per task, in stable order.
    ///
    /// The local saving is `duration - speed_up_duration`; the project
    /// saving is usually smaller since off-critical slack absorbs it.
    pub fn leverage(&self) -> impl Iterator<Item = (&TaskName, f64, f64)> {
        self.graph.tasks().map(|t| {
            (
                &t.name,
                t.save_duration(),
                self.can_save.get(&t.name).copied().unwrap_or(0.0),
            )
        })
    }

    /// The schedule with every task accelerated: the shortest achievable
    /// project duration (and the most expensive way to get it).
    pub fn min_duration_plan(&self) -> Result<Schedule> {
        Schedule::compute(&self.graph, &CrashSelection::all(&self.graph))
    }
}
