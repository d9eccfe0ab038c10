// src/graph/mod.rs

//! Strongly-typed task graph.
//!
//! - [`task`] holds the immutable per-task record (durations, costs, edges).
//! - [`graph`] holds the validated DAG: name lookup, successor adjacency and
//!   a precomputed topological order.

pub mod graph;
pub mod task;

pub use graph::TaskGraph;
pub use task::Task;
