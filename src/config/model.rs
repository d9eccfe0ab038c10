// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::Cost;

/// Top-level project file as read from TOML:
///
/// ```toml
/// [config]
/// max_subset_tasks = 20
///
/// [task.A]
/// duration = 4
/// cost = 1500
/// speed_up_duration = 3
/// speed_up_cost = 1900
///
/// [task.B]
/// duration = 6
/// cost = 1000
/// speed_up_duration = 4
/// speed_up_cost = 1300
/// after = ["A"]
/// ```
///
/// Tasks are keyed by name; `BTreeMap` keeps the key order deterministic,
/// which fixes the engine's positional task order.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Global knobs from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tasks from `[task.<name>]`.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Refuse crash analysis above this many tasks.
    ///
    /// Enumeration is `2^n - 1` scenarios; the default keeps runs in the
    /// low-millions range.
    #[serde(default = "default_max_subset_tasks")]
    pub max_subset_tasks: usize,
}

fn default_max_subset_tasks() -> usize {
    20
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            max_subset_tasks: default_max_subset_tasks(),
        }
    }
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Normal duration.
    pub duration: f64,

    /// Normal cost.
    pub cost: Cost,

    /// Accelerated ("crashed") duration.
    ///
    /// If omitted, the task cannot be usefully crashed and keeps its normal
    /// duration when selected.
    #[serde(default)]
    pub speed_up_duration: Option<f64>,

    /// Accelerated cost; defaults to the normal cost when omitted.
    #[serde(default)]
    pub speed_up_cost: Option<Cost>,

    /// Predecessor names: this task starts only after all of them finish.
    #[serde(default)]
    pub after: Vec<String>,
}

impl TaskConfig {
    /// Effective accelerated duration, falling back to the normal duration.
    pub fn effective_speed_up_duration(&self) -> f64 {
        self.speed_up_duration.unwrap_or(self.duration)
    }

    /// Effective accelerated cost, falling back to the normal cost.
    pub fn effective_speed_up_cost(&self) -> Cost {
        self.speed_up_cost.unwrap_or(self.cost)
    }
}
