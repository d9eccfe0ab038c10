// src/schedule/passes.rs

//! The three CPM stages, each a plain function over the row table.
//!
//! The passes only read the graph's adjacency; all per-scenario state lives
//! in the caller's `ScheduleRow` buffer.

use std::collections::HashMap;

use tracing::trace;

use crate::errors::{CrashdagError, Result};
use crate::graph::TaskGraph;
use crate::schedule::schedule::ScheduleRow;
use crate::types::TaskName;

/// Forward pass: Early Start / Early Finish, in topological order.
///
/// A task with no predecessors starts at 0; otherwise it starts at the
/// latest Early Finish among its predecessors.
pub fn forward_pass(
    graph: &TaskGraph,
    index: &HashMap<TaskName, usize>,
    rows: &mut [ScheduleRow],
) -> Result<()> {
    for name in graph.topo_order() {
        let i = lookup(index, name, name)?;

        let mut es = 0.0f64;
        if let Some(task) = graph.task(name) {
            for pred in &task.predecessors {
                let p = lookup(index, pred, name)?;
                es = es.max(rows[p].ef);
            }
        }

        rows[i].es = es;
        rows[i].ef = es + rows[i].active_duration;
        trace!(task = %name, es = rows[i].es, ef = rows[i].ef, "forward pass");
    }
    Ok(())
}

/// Backward pass: Late Start / Late Finish, in decreasing Early Finish
/// order (ties broken by reverse topological position, so a successor is
/// always processed before its predecessors even at equal EF).
///
/// Every task finishing at the project's overall finish is pinned to
/// `LF = EF`; other tasks take the minimum Late Start over their
/// successors, falling back to the project finish for dangling branches
/// with no successor.
pub fn backward_pass(
    graph: &TaskGraph,
    index: &HashMap<TaskName, usize>,
    rows: &mut [ScheduleRow],
) {
    if rows.is_empty() {
        return;
    }

    let project_finish = rows.iter().map(|r| r.ef).fold(0.0, f64::max);

    let topo_pos: HashMap<&str, usize> = graph
        .topo_order()
        .iter()
        .enumerate()
        .map(|(pos, name)| (name.as_str(), pos))
        .collect();

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        rows[b]
            .ef
            .total_cmp(&rows[a].ef)
            .then_with(|| topo_pos[rows[b].name.as_str()].cmp(&topo_pos[rows[a].name.as_str()]))
    });

    for i in order {
        let lf = if rows[i].ef == project_finish {
            rows[i].ef
        } else {
            let successors = graph.successors_of(&rows[i].name);
            if successors.is_empty() {
                project_finish
            } else {
                successors
                    .iter()
                    .filter_map(|s| index.get(s.as_str()).map(|&j| rows[j].ls))
                    .fold(project_finish, f64::min)
            }
        };
        rows[i].lf = lf;
        rows[i].ls = lf - rows[i].active_duration;
        trace!(task = %rows[i].name, ls = rows[i].ls, lf = rows[i].lf, "backward pass");
    }
}

/// Slack derivation and critical marking.
///
/// `TF = LS - ES`. `FF` is the gap to the earliest successor start; for a
/// task with no successors it equals `TF` (the conventional CPM choice for
/// terminal tasks). A task is critical iff both floats are zero.
pub fn derive_slack(
    graph: &TaskGraph,
    index: &HashMap<TaskName, usize>,
    rows: &mut [ScheduleRow],
) {
    for i in 0..rows.len() {
        rows[i].tf = rows[i].ls - rows[i].es;

        let successors = graph.successors_of(&rows[i].name);
        rows[i].ff = if successors.is_empty() {
            rows[i].tf
        } else {
            let min_es = successors
                .iter()
                .filter_map(|s| index.get(s.as_str()).map(|&j| rows[j].es))
                .fold(f64::INFINITY, f64::min);
            min_es - rows[i].ef
        };

        rows[i].is_critical = rows[i].tf == 0.0 && rows[i].ff == 0.0;
    }
}

fn lookup(index: &HashMap<TaskName, usize>, name: &str, referrer: &str) -> Result<usize> {
    index
        .get(name)
        .copied()
        .ok_or_else(|| CrashdagError::UnknownPredecessor {
            task: referrer.to_string(),
            predecessor: name.to_string(),
        })
}
