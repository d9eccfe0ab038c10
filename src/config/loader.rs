// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::{CrashdagError, Result};

/// Load a project file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (DAG correctness, speed-up sanity). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading project file at {path:?}"))?;

    let config: ConfigFile =
        toml::from_str(&contents).map_err(|e| CrashdagError::TomlError(Box::new(e)))?;

    Ok(config)
}

/// Load a project file from path and run semantic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML, applying serde defaults.
/// - Checks for unknown `after` references, cycles, inconsistent speed-up
///   data and negative values.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Default project file path: `Crashdag.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Crashdag.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_and_validates_a_real_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[task.A]
duration = 4
cost = 1500
speed_up_duration = 3
speed_up_cost = 1900

[task.B]
duration = 6
cost = "1000.50"
after = ["A"]
"#
        )
        .unwrap();

        let cfg = load_and_validate(file.path()).unwrap();
        assert_eq!(cfg.task.len(), 2);
        assert_eq!(cfg.config.max_subset_tasks, 20);
        assert_eq!(cfg.task["B"].after, vec!["A".to_string()]);
        assert_eq!(
            cfg.task["B"].effective_speed_up_duration(),
            cfg.task["B"].duration
        );
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_from_path("/nonexistent/Crashdag.toml").unwrap_err();
        assert!(err.to_string().contains("Crashdag.toml"));
    }

    #[test]
    fn broken_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[task.A\nduration = 4").unwrap();
        let err = load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, CrashdagError::TomlError(_)));
    }
}
