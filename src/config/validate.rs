// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::ConfigFile;
use crate::crash::MAX_CRASH_TASKS;
use crate::errors::{CrashdagError, Result};

/// Run semantic validation against a loaded project file.
///
/// This checks:
/// - there is at least one task
/// - `max_subset_tasks` is within `1..=63`
/// - all `after` references resolve to existing tasks, with no self-deps
/// - the task graph has no cycles
/// - durations and costs are finite and non-negative
/// - `speed_up_duration <= duration` wherever a speed-up is given
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_global_config(cfg)?;
    validate_task_data(cfg)?;
    validate_task_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &ConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(CrashdagError::ConfigError(
            "project file must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &ConfigFile) -> Result<()> {
    let limit = cfg.config.max_subset_tasks;
    if limit == 0 || limit > MAX_CRASH_TASKS {
        return Err(CrashdagError::ConfigError(format!(
            "[config].max_subset_tasks must be in 1..={MAX_CRASH_TASKS} (got {limit})"
        )));
    }
    Ok(())
}

fn validate_task_data(cfg: &ConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if !task.duration.is_finite() || task.duration < 0.0 {
            return Err(CrashdagError::NegativeValue {
                task: name.clone(),
                field: "duration",
            });
        }
        if task.cost.is_negative() {
            return Err(CrashdagError::NegativeValue {
                task: name.clone(),
                field: "cost",
            });
        }

        let speed_up = task.effective_speed_up_duration();
        if !speed_up.is_finite() || speed_up < 0.0 {
            return Err(CrashdagError::NegativeValue {
                task: name.clone(),
                field: "speed_up_duration",
            });
        }
        if speed_up > task.duration {
            return Err(CrashdagError::InvalidSpeedUp {
                task: name.clone(),
                duration: task.duration,
                speed_up_duration: speed_up,
            });
        }
        if task.effective_speed_up_cost().is_negative() {
            return Err(CrashdagError::NegativeValue {
                task: name.clone(),
                field: "speed_up_cost",
            });
        }
    }
    Ok(())
}

fn validate_task_dependencies(cfg: &ConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            if !cfg.task.contains_key(dep) {
                return Err(CrashdagError::UnknownPredecessor {
                    task: name.clone(),
                    predecessor: dep.clone(),
                });
            }
            if dep == name {
                return Err(CrashdagError::DependencyCycle(name.clone()));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &ConfigFile) -> Result<()> {
    // Edge direction: predecessor -> task, so for
    //   [task.B]
    //   after = ["A"]
    // we add edge A -> B. A topological sort fails iff there is a cycle.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }
    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(CrashdagError::DependencyCycle(
            cycle.node_id().to_string(),
        )),
    }
}
