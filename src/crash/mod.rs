// src/crash/mod.rs

//! Time-cost tradeoff ("crashing") analysis.
//!
//! - [`enumerate`] lazily walks every non-empty subset of tasks and
//!   schedules each one as an independent scenario.
//! - [`frontier`] reduces the enumeration to the minimum-cost frontier:
//!   for every achievable duration saving, the cheapest subset(s).

pub mod enumerate;
pub mod frontier;

pub use enumerate::{CrashPlan, CrashPlans, ScenarioFailure, MAX_CRASH_TASKS};
pub use frontier::{min_cost_frontier, CrashAnalysis};
