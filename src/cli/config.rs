//! TOML configuration file support for repeated runs.
//!
//! Instead of passing grid flags on every invocation, defaults can live in
//! a config file:
//!
//! ```toml
//! # ellingham.toml
//! [grid]
//! t_min = 500.0
//! t_max = 2000.0
//! step = 50.0
//!
//! [output]
//! dir = "processed"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for ellingham.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Temperature grid defaults.
    #[serde(default)]
    pub grid: GridConfig,

    /// Output location defaults.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Grid defaults for the compute command.
#[derive(Debug, Default, Deserialize)]
pub struct GridConfig {
    /// Lower bound in Kelvin.
    pub t_min: Option<f64>,

    /// Upper bound in Kelvin.
    pub t_max: Option<f64>,

    /// Fixed step in Kelvin.
    pub step: Option<f64>,

    /// Number of evenly spaced points (overrides `step`).
    pub points: Option<usize>,
}

/// Output defaults for the process command.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Directory processed artifacts are written into.
    pub dir: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the config file when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [grid]
            t_min = 500.0
            t_max = 2000.0
            step = 50.0

            [output]
            dir = "processed"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.grid.t_min, Some(500.0));
        assert_eq!(config.grid.t_max, Some(2000.0));
        assert_eq!(config.grid.step, Some(50.0));
        assert_eq!(config.grid.points, None);
        assert_eq!(config.output.dir.as_deref(), Some("processed"));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [grid]
            points = 100
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.grid.points, Some(100));
        assert_eq!(config.grid.t_min, None);
        assert_eq!(config.output.dir, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.grid.step, None);
    }
}
