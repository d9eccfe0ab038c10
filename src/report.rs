// src/report.rs

//! Delimited-table report writer for crash plans.
//!
//! One header line plus one comma-separated row per plan. List-valued
//! columns (task names) are joined with `+` so the row stays a flat CSV
//! record.

use std::io::Write;

use crate::crash::CrashPlan;
use crate::errors::Result;
use crate::types::TaskName;

pub const HEADER: &str =
    "speed_up_tasks,save_duration,extra_cost,total_duration,total_cost,critical_path";

/// Write the header and one row per plan.
pub fn write_plans<W: Write>(out: &mut W, rows: &[CrashPlan]) -> Result<()> {
    writeln!(out, "{HEADER}")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            join_names(&row.speed_up_tasks),
            row.save_duration,
            row.extra_cost,
            row.total_duration,
            row.total_cost,
            join_names(&row.critical_path),
        )?;
    }
    Ok(())
}

fn join_names(names: &[TaskName]) -> String {
    names.join("+")
}
