// src/graph/task.rs

use crate::errors::{CrashdagError, Result};
use crate::types::{Cost, TaskName};

/// One unit of work in a plan.
///
/// A task carries two duration/cost pairs: the normal pair and the
/// "crashed" (accelerated) pair. Which pair is active for a given scenario
/// is decided by the scheduling overlay, never stored on the task itself, so
/// task records are immutable after graph construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: TaskName,
    pub duration: f64,
    pub cost: Cost,
    pub speed_up_duration: f64,
    pub speed_up_cost: Cost,
    /// Names of tasks that must finish before this one starts.
    pub predecessors: Vec<TaskName>,
}

impl Task {
    /// Build a task, validating the crashing model's data invariants:
    /// durations finite and non-negative, costs non-negative, and
    /// `speed_up_duration <= duration` (accelerating must not lengthen the
    /// task). Duplicate predecessor entries are collapsed; a task may not
    /// list itself.
    pub fn new(
        name: impl Into<TaskName>,
        duration: f64,
        cost: Cost,
        speed_up_duration: f64,
        speed_up_cost: Cost,
        predecessors: Vec<TaskName>,
    ) -> Result<Self> {
        let name = name.into();

        if !duration.is_finite() || duration < 0.0 {
            return Err(CrashdagError::NegativeValue {
                task: name,
                field: "duration",
            });
        }
        if !speed_up_duration.is_finite() || speed_up_duration < 0.0 {
            return Err(CrashdagError::NegativeValue {
                task: name,
                field: "speed_up_duration",
            });
        }
        if cost.is_negative() {
            return Err(CrashdagError::NegativeValue {
                task: name,
                field: "cost",
            });
        }
        if speed_up_cost.is_negative() {
            return Err(CrashdagError::NegativeValue {
                task: name,
                field: "speed_up_cost",
            });
        }
        if speed_up_duration > duration {
            return Err(CrashdagError::InvalidSpeedUp {
                task: name,
                duration,
                speed_up_duration,
            });
        }

        let mut preds: Vec<TaskName> = Vec::with_capacity(predecessors.len());
        for p in predecessors {
            if p == name {
                return Err(CrashdagError::DependencyCycle(name));
            }
            if !preds.contains(&p) {
                preds.push(p);
            }
        }

        Ok(Self {
            name,
            duration,
            cost,
            speed_up_duration,
            speed_up_cost,
            predecessors: preds,
        })
    }

    /// How much schedule time crashing this single task buys locally.
    pub fn save_duration(&self) -> f64 {
        self.duration - self.speed_up_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(units: i64) -> Cost {
        Cost::from_units(units)
    }

    #[test]
    fn rejects_speed_up_longer_than_normal() {
        let err = Task::new("A", 4.0, cost(100), 5.0, cost(200), vec![]).unwrap_err();
        assert!(matches!(err, CrashdagError::InvalidSpeedUp { .. }));
    }

    #[test]
    fn rejects_negative_duration_and_cost() {
        assert!(Task::new("A", -1.0, cost(100), 0.0, cost(200), vec![]).is_err());
        assert!(Task::new("A", 1.0, cost(-1), 1.0, cost(200), vec![]).is_err());
        assert!(Task::new("A", f64::NAN, cost(1), 1.0, cost(2), vec![]).is_err());
    }

    #[test]
    fn rejects_self_dependency() {
        let err = Task::new("A", 4.0, cost(100), 3.0, cost(200), vec!["A".into()]).unwrap_err();
        assert!(matches!(err, CrashdagError::DependencyCycle(_)));
    }

    #[test]
    fn collapses_duplicate_predecessors() {
        let t = Task::new(
            "B",
            4.0,
            cost(100),
            3.0,
            cost(200),
            vec!["A".into(), "A".into()],
        )
        .unwrap();
        assert_eq!(t.predecessors, vec!["A".to_string()]);
        assert_eq!(t.save_duration(), 1.0);
    }
}
