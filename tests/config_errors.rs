//! End-to-end project-file loading: TOML through validation and graph build.

use std::error::Error;
use std::io::Write;

use crashdag::config::load_and_validate;
use crashdag::errors::CrashdagError;
use crashdag::graph::TaskGraph;
use crashdag::plan::Plan;
use crashdag::types::Cost;

type TestResult = Result<(), Box<dyn Error>>;

fn load(toml: &str) -> Result<crashdag::config::ConfigFile, CrashdagError> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{toml}").unwrap();
    load_and_validate(file.path())
}

#[test]
fn valid_project_builds_a_plan() -> TestResult {
    let cfg = load(
        r#"
[task.A]
duration = 4
cost = 1500
speed_up_duration = 3
speed_up_cost = 1900

[task.B]
duration = 6
cost = "1000.50"
speed_up_duration = 4
speed_up_cost = 1300.25
after = ["A"]
"#,
    )?;

    let plan = Plan::new(TaskGraph::from_config(&cfg)?)?;
    assert_eq!(plan.total_duration(), 10.0);
    assert_eq!(plan.total_cost(), Cost::from_cents(150000 + 100050));
    assert_eq!(plan.critical_path(), vec!["A", "B"]);
    Ok(())
}

#[test]
fn unknown_predecessor_is_fatal() {
    let err = load(
        r#"
[task.A]
duration = 4
cost = 100
after = ["ghost"]
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CrashdagError::UnknownPredecessor { ref task, ref predecessor }
            if task == "A" && predecessor == "ghost"
    ));
}

#[test]
fn dependency_cycle_is_fatal() {
    let err = load(
        r#"
[task.A]
duration = 4
cost = 100
after = ["B"]

[task.B]
duration = 2
cost = 100
after = ["A"]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, CrashdagError::DependencyCycle(_)));
}

#[test]
fn speed_up_longer_than_duration_is_fatal() {
    let err = load(
        r#"
[task.A]
duration = 4
cost = 100
speed_up_duration = 5
speed_up_cost = 200
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CrashdagError::InvalidSpeedUp { ref task, duration, speed_up_duration }
            if task == "A" && duration == 4.0 && speed_up_duration == 5.0
    ));
}

#[test]
fn negative_cost_is_fatal() {
    let err = load(
        r#"
[task.A]
duration = 4
cost = -100
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CrashdagError::NegativeValue { ref task, field: "cost" } if task == "A"
    ));
}

#[test]
fn empty_project_is_fatal() {
    let err = load("").unwrap_err();
    assert!(matches!(err, CrashdagError::ConfigError(_)));
}

#[test]
fn bad_max_subset_tasks_is_fatal() {
    let err = load(
        r#"
[config]
max_subset_tasks = 0

[task.A]
duration = 4
cost = 100
"#,
    )
    .unwrap_err();
    assert!(matches!(err, CrashdagError::ConfigError(_)));
}

#[test]
fn omitted_speed_up_falls_back_to_normal_pair() -> TestResult {
    let cfg = load(
        r#"
[task.A]
duration = 4
cost = 100
"#,
    )?;
    let plan = Plan::new(TaskGraph::from_config(&cfg)?)?;
    assert_eq!(plan.speed_up_can_save("A"), Some(0.0));
    Ok(())
}
