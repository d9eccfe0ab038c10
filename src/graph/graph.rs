// src/graph/graph.rs

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::ConfigFile;
use crate::errors::{CrashdagError, Result};
use crate::graph::task::Task;
use crate::types::TaskName;

/// Validated in-memory task DAG keyed by task name.
///
/// Construction fails fast on duplicate names, unresolved predecessor
/// references and dependency cycles, so every pass downstream can assume a
/// well-formed graph. Besides the name lookup it precomputes:
///
/// - a stable positional order (`names`) fixing subset-enumeration and
///   report row order,
/// - the successor adjacency (who lists me as a predecessor),
/// - a topological order for the forward pass.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: HashMap<TaskName, Task>,
    /// Stable insertion order of task names.
    order: Vec<TaskName>,
    successors: HashMap<TaskName, Vec<TaskName>>,
    topo: Vec<TaskName>,
}

impl TaskGraph {
    /// Build a graph from task records, keeping their given order as the
    /// stable positional order.
    ///
    /// An empty task list is allowed; schedules over it are degenerate
    /// (total duration 0, empty critical path).
    pub fn new(task_list: Vec<Task>) -> Result<Self> {
        let mut tasks: HashMap<TaskName, Task> = HashMap::with_capacity(task_list.len());
        let mut order: Vec<TaskName> = Vec::with_capacity(task_list.len());

        for task in task_list {
            if tasks.contains_key(&task.name) {
                return Err(CrashdagError::ConfigError(format!(
                    "duplicate task name '{}'",
                    task.name
                )));
            }
            order.push(task.name.clone());
            tasks.insert(task.name.clone(), task);
        }

        // Every predecessor must resolve to a known task; a missing name must
        // never be treated as a duration-0 wait.
        for name in &order {
            for pred in &tasks[name].predecessors {
                if !tasks.contains_key(pred) {
                    return Err(CrashdagError::UnknownPredecessor {
                        task: name.clone(),
                        predecessor: pred.clone(),
                    });
                }
            }
        }

        // Successor adjacency: invert the predecessor lists.
        let mut successors: HashMap<TaskName, Vec<TaskName>> = order
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        for name in &order {
            for pred in &tasks[name].predecessors {
                if let Some(succs) = successors.get_mut(pred) {
                    succs.push(name.clone());
                }
            }
        }

        // Topological order via petgraph; edge direction pred -> task, so a
        // sort failure pinpoints a node on a cycle.
        let mut dag: DiGraphMap<&str, ()> = DiGraphMap::new();
        for name in &order {
            dag.add_node(name.as_str());
        }
        for name in &order {
            for pred in &tasks[name].predecessors {
                dag.add_edge(pred.as_str(), name.as_str(), ());
            }
        }
        let topo = match toposort(&dag, None) {
            Ok(sorted) => sorted.into_iter().map(|n| n.to_string()).collect(),
            Err(cycle) => {
                return Err(CrashdagError::DependencyCycle(
                    cycle.node_id().to_string(),
                ));
            }
        };

        Ok(Self {
            tasks,
            order,
            successors,
            topo,
        })
    }

    /// Build a graph from a validated [`ConfigFile`].
    ///
    /// Task order follows the config's deterministic key order. Validation
    /// errors surface here too, so an unvalidated config still fails fast.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut tasks = Vec::with_capacity(cfg.task.len());
        for (name, tc) in cfg.task.iter() {
            tasks.push(Task::new(
                name.clone(),
                tc.duration,
                tc.cost,
                tc.effective_speed_up_duration(),
                tc.effective_speed_up_cost(),
                tc.after.clone(),
            )?);
        }
        Self::new(tasks)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Task names in stable positional order.
    pub fn names(&self) -> &[TaskName] {
        &self.order
    }

    /// Tasks in stable positional order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().map(|name| &self.tasks[name])
    }

    /// Task names in an order where every predecessor comes first.
    pub fn topo_order(&self) -> &[TaskName] {
        &self.topo
    }

    /// Immediate successors of a task (tasks that list it as a predecessor).
    pub fn successors_of(&self, name: &str) -> &[TaskName] {
        self.successors
            .get(name)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cost;

    fn task(name: &str, preds: &[&str]) -> Task {
        Task::new(
            name,
            1.0,
            Cost::from_units(10),
            1.0,
            Cost::from_units(20),
            preds.iter().map(|p| p.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn builds_successors_and_topo_order() {
        let g = TaskGraph::new(vec![
            task("A", &[]),
            task("B", &["A"]),
            task("C", &["A", "B"]),
        ])
        .unwrap();

        assert_eq!(g.successors_of("A"), ["B".to_string(), "C".to_string()]);
        assert_eq!(g.successors_of("C"), Vec::<TaskName>::new().as_slice());

        let topo = g.topo_order();
        let pos = |n: &str| topo.iter().position(|t| t == n).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("B") < pos("C"));
    }

    #[test]
    fn unknown_predecessor_fails_fast() {
        let err = TaskGraph::new(vec![task("B", &["missing"])]).unwrap_err();
        assert!(matches!(
            err,
            CrashdagError::UnknownPredecessor { ref task, ref predecessor }
                if task == "B" && predecessor == "missing"
        ));
    }

    #[test]
    fn cycle_is_rejected() {
        let err = TaskGraph::new(vec![task("A", &["B"]), task("B", &["A"])]).unwrap_err();
        assert!(matches!(err, CrashdagError::DependencyCycle(_)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = TaskGraph::new(vec![task("A", &[]), task("A", &[])]).unwrap_err();
        assert!(matches!(err, CrashdagError::ConfigError(_)));
    }

    #[test]
    fn empty_graph_is_allowed() {
        let g = TaskGraph::new(vec![]).unwrap();
        assert!(g.is_empty());
        assert!(g.topo_order().is_empty());
    }
}
