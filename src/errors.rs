// src/errors.rs

//! Crate-wide error type and `Result` alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrashdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] Box<toml::de::Error>),

    #[error("task '{task}' references unknown predecessor '{predecessor}'")]
    UnknownPredecessor { task: String, predecessor: String },

    #[error("cyclic dependency in task graph involving task '{0}'")]
    DependencyCycle(String),

    #[error(
        "task '{task}' has speed_up_duration {speed_up_duration} greater than duration {duration}"
    )]
    InvalidSpeedUp {
        task: String,
        duration: f64,
        speed_up_duration: f64,
    },

    #[error("task '{task}' has a negative or non-finite {field}")]
    NegativeValue { task: String, field: &'static str },

    #[error("crash analysis over {count} tasks exceeds the limit of {limit} (2^n scenarios)")]
    TooManyTasks { count: usize, limit: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CrashdagError>;
