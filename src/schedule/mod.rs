// src/schedule/mod.rs

//! Single-scenario CPM scheduling.
//!
//! - [`schedule`] holds the scenario overlay ([`CrashSelection`]) and the
//!   annotated output ([`Schedule`], [`ScheduleRow`]).
//! - [`passes`] contains the forward pass (ES/EF), backward pass (LS/LF)
//!   and slack/critical-path derivation that [`Schedule::compute`] runs in
//!   sequence.

pub mod passes;
pub mod schedule;

pub use schedule::{CrashSelection, Schedule, ScheduleRow};
