// src/lib.rs

pub mod cli;
pub mod config;
pub mod crash;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod plan;
pub mod report;
pub mod schedule;
pub mod types;

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::crash::{min_cost_frontier, CrashPlan, CrashPlans};
use crate::errors::CrashdagError;
use crate::graph::TaskGraph;
use crate::plan::Plan;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project-file loading and validation
/// - the baseline plan (critical path + per-task leverage)
/// - crash analysis (all plans or the min-cost frontier)
/// - report output
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let graph = TaskGraph::from_config(&cfg)?;
    let plan = Plan::new(graph)?;
    print_baseline(&plan);

    if args.baseline_only {
        return Ok(());
    }

    let limit = cfg.config.max_subset_tasks;
    let count = plan.graph().len();
    if count > limit {
        return Err(CrashdagError::TooManyTasks { count, limit }.into());
    }

    let rows = if args.all_plans {
        collect_all_plans(&plan)?
    } else {
        let analysis = min_cost_frontier(&plan)?;
        if !analysis.failures.is_empty() {
            warn!(
                failed = analysis.failures.len(),
                "some crash scenarios failed to schedule"
            );
        }
        analysis.frontier
    };

    info!(rows = rows.len(), "writing plan report");
    match args.out {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file at {path:?}"))?;
            let mut out = BufWriter::new(file);
            report::write_plans(&mut out, &rows)?;
            out.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            report::write_plans(&mut out, &rows)?;
        }
    }

    Ok(())
}

/// Run the full enumeration, keeping rows in subset order. Per-scenario
/// failures are logged and skipped, never fatal.
fn collect_all_plans(plan: &Plan) -> Result<Vec<CrashPlan>> {
    let mut rows = Vec::new();
    for item in CrashPlans::new(plan)? {
        match item {
            Ok(row) => rows.push(row),
            Err(failure) => warn!(
                subset = ?failure.speed_up_tasks,
                error = %failure.error,
                "crash scenario failed; continuing"
            ),
        }
    }
    Ok(rows)
}

/// Baseline summary: critical path, totals, and each task's crash leverage.
fn print_baseline(plan: &Plan) {
    println!("Critical Path: {}", plan.critical_path().join(" -> "));
    println!("Total Duration: {}", plan.total_duration());
    println!("Total Cost: {}", plan.total_cost());
    println!();

    println!("task leverage (crashing one task alone):");
    for (name, local, project) in plan.leverage() {
        println!("  - {name}: task saves {local}, project saves {project}");
    }
    println!();
}

/// Simple dry-run output: print tasks, durations, costs and edges.
fn print_dry_run(cfg: &ConfigFile) {
    println!("crashdag dry-run");
    println!("  config.max_subset_tasks = {}", cfg.config.max_subset_tasks);
    println!();

    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        println!("  - {name}");
        println!(
            "      duration: {} (crashed: {})",
            task.duration,
            task.effective_speed_up_duration()
        );
        println!(
            "      cost: {} (crashed: {})",
            task.cost,
            task.effective_speed_up_cost()
        );
        if !task.after.is_empty() {
            println!("      after: {:?}", task.after);
        }
    }
}
