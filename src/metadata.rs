//! Run provenance for output artifacts.
//!
//! Every written CSV gets a small human-readable JSON sidecar recording
//! where the numbers came from: tool version, the command that produced the
//! artifact, the source file or model citation, the grid parameters, and a
//! timestamp. Studies outlive the scripts that produced their data; a table
//! without provenance is a table nobody can cite.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors from provenance serialization.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error writing the sidecar.
    #[error("failed to write sidecar: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Grid parameters recorded alongside sweep artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Lower bound in Kelvin.
    pub t_min: f64,
    /// Upper bound in Kelvin.
    pub t_max: f64,
    /// Step size in Kelvin, for fixed-step grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Point count, for linear grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
}

/// Provenance record written as `<artifact>.meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunProvenance {
    /// Producing tool name.
    pub tool: String,
    /// Producing tool version.
    pub version: String,
    /// The subcommand and principal options that produced the artifact.
    pub command: String,
    /// RFC 3339 timestamp of generation.
    pub generated_at: String,
    /// Source file the artifact was derived from, for processing runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Model or database citation, for computed runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Grid parameters, for sweep runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    /// Pressure condition in pascal.
    pub pressure_pa: f64,
}

impl RunProvenance {
    /// Start a provenance record for `command`, stamped now.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            source_file: None,
            database: None,
            grid: None,
            pressure_pa: crate::units::STANDARD_PRESSURE_PA,
        }
    }

    /// Record the source file the artifact was derived from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_file = Some(source.into());
        self
    }

    /// Record the model or database citation.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Record the sweep grid.
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the sidecar next to `artifact` and return its path.
    pub fn write_sidecar(&self, artifact: &Path) -> Result<PathBuf, MetadataError> {
        let mut name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.push_str(".meta.json");
        let path = artifact.with_file_name(name);
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("cu2o_processed.csv");

        let prov = RunProvenance::new("process")
            .with_source("cu2o_dGf_1273-1873K.txt")
            .with_database("TCOX14");
        let sidecar = prov.write_sidecar(&artifact).unwrap();

        assert_eq!(
            sidecar.file_name().unwrap().to_string_lossy(),
            "cu2o_processed.csv.meta.json"
        );
        let text = std::fs::read_to_string(&sidecar).unwrap();
        let back: RunProvenance = serde_json::from_str(&text).unwrap();
        assert_eq!(back, prov);
        assert_eq!(back.tool, "ellingham");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let prov = RunProvenance::new("rank");
        let json = prov.to_json().unwrap();
        assert!(!json.contains("source_file"));
        assert!(!json.contains("grid"));
    }

    #[test]
    fn test_grid_spec_round_trip() {
        let prov = RunProvenance::new("compute").with_grid(GridSpec {
            t_min: 500.0,
            t_max: 2000.0,
            step: Some(50.0),
            points: None,
        });
        let json = prov.to_json().unwrap();
        let back: RunProvenance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid.unwrap().step, Some(50.0));
    }
}
