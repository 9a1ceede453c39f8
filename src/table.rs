//! Temperature-indexed output tables and their CSV serialization.
//!
//! Two artifact shapes cover the study:
//!
//! - [`ProcessedTable`]: one oxide per file, produced from a raw export.
//!   Columns `T_K, T_C, GM_J, GM_kJ, dGf_kJ_per_molO2`, matching the
//!   processed files the plotting notebooks consume.
//! - [`SweepTable`]: all requested oxides over one grid, produced from the
//!   registry models. A column family per oxide plus a note column that
//!   carries extrapolation flags and per-temperature error markers.
//!
//! Every table is created fresh per invocation and written as flat CSV;
//! there is no persistence or update path.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::formation::{formation_per_mol_o2, FormationModel};
use crate::gibbs::RangePolicy;
use crate::grid::TemperatureGrid;
use crate::species::Oxide;
use crate::tcexport::RawExport;
use crate::units::{j_to_kj, kelvin_to_celsius};

/// Errors from table construction and CSV I/O.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error on the CSV file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization or parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A non-positive O2 normalization factor.
    #[error("O2 factor must be positive, got {0}")]
    NonPositiveFactor(f64),
}

/// One row of a processed single-oxide table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRow {
    /// Temperature in Kelvin.
    #[serde(rename = "T_K")]
    pub t_k: f64,
    /// Temperature in Celsius.
    #[serde(rename = "T_C")]
    pub t_c: f64,
    /// Gibbs energy in J/mol as exported.
    #[serde(rename = "GM_J")]
    pub gm_j: f64,
    /// Gibbs energy in kJ/mol.
    #[serde(rename = "GM_kJ")]
    pub gm_kj: f64,
    /// Formation energy normalized per mole O2, kJ/mol O2.
    #[serde(rename = "dGf_kJ_per_molO2")]
    pub dgf_kj_per_mol_o2: f64,
}

/// A processed single-oxide table, ready for plotting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessedTable {
    /// Rows in source order.
    pub rows: Vec<ProcessedRow>,
}

impl ProcessedTable {
    /// Build from a raw export by applying the unit conversions and the
    /// per-mole-O2 normalization.
    pub fn from_export(export: &RawExport, o2_factor: f64) -> Result<Self, TableError> {
        if o2_factor <= 0.0 {
            return Err(TableError::NonPositiveFactor(o2_factor));
        }

        let rows = export
            .rows
            .iter()
            .map(|&(t_k, gm_j)| {
                let gm_kj = j_to_kj(gm_j);
                ProcessedRow {
                    t_k,
                    t_c: kelvin_to_celsius(t_k),
                    gm_j,
                    gm_kj,
                    dgf_kj_per_mol_o2: gm_kj / o2_factor,
                }
            })
            .collect();
        Ok(Self { rows })
    }

    /// Write the table as CSV.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let file = File::create(path.as_ref())?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(
            "wrote {} rows to {}",
            self.rows.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Read a table back from CSV. Values round-trip to full f64 precision.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path.as_ref())?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(Self { rows })
    }
}

/// One oxide's cell within a sweep row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepCell {
    /// Formation energy per mole O2, J/mol O2. `None` when evaluation
    /// failed at this temperature.
    pub dgf_j_per_o2: Option<f64>,
    /// Whether the value came from outside the assessed range.
    pub extrapolated: bool,
    /// Error marker recorded when evaluation failed.
    pub error: Option<String>,
}

/// One temperature sample of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    /// Temperature in Kelvin.
    pub t_k: f64,
    /// Temperature in Celsius.
    pub t_c: f64,
    /// Cells in oxide order.
    pub cells: Vec<SweepCell>,
}

/// A multi-oxide formation-energy sweep over a temperature grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepTable {
    /// Oxide names, one per cell column family.
    pub oxide_names: Vec<String>,
    /// Rows in grid order.
    pub rows: Vec<SweepRow>,
}

impl SweepTable {
    /// Evaluate `oxides` over `grid` with the given model and range policy.
    ///
    /// A failed evaluation at one temperature leaves an error marker in that
    /// cell and the sweep continues; it is never fatal to the run.
    pub fn compute(
        oxides: &[&Oxide],
        grid: &TemperatureGrid,
        model: FormationModel,
        policy: RangePolicy,
    ) -> Self {
        let oxide_names = oxides.iter().map(|o| o.name.to_string()).collect();
        let rows = grid
            .iter_kc()
            .map(|(t_k, t_c)| {
                let cells = oxides
                    .iter()
                    .map(|oxide| match formation_per_mol_o2(oxide, t_k, model, policy) {
                        Ok(f) => SweepCell {
                            dgf_j_per_o2: Some(f.dgf_j_per_o2),
                            extrapolated: f.extrapolated,
                            error: None,
                        },
                        Err(e) => {
                            warn!("{} at {} K: {}", oxide.name, t_k, e);
                            SweepCell {
                                dgf_j_per_o2: None,
                                extrapolated: false,
                                error: Some(e.to_string()),
                            }
                        }
                    })
                    .collect();
                SweepRow { t_k, t_c, cells }
            })
            .collect();

        Self { oxide_names, rows }
    }

    /// Successful evaluations per oxide, in oxide order.
    pub fn success_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.oxide_names.len()];
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                if cell.dgf_j_per_o2.is_some() {
                    counts[i] += 1;
                }
            }
        }
        counts
    }

    /// Write the sweep as CSV.
    ///
    /// Columns: `T_K, T_C`, then per oxide `dG_<name>_per_O2` (J/mol O2)
    /// and `note_<name>`. Failed cells serialize as an empty value with the
    /// error text in the note column; extrapolated cells carry an
    /// `extrapolated` note.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let file = File::create(path.as_ref())?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        let mut header = vec!["T_K".to_string(), "T_C".to_string()];
        for name in &self.oxide_names {
            header.push(format!("dG_{name}_per_O2"));
            header.push(format!("note_{name}"));
        }
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.t_k.to_string(), row.t_c.to_string()];
            for cell in &row.cells {
                match cell.dgf_j_per_o2 {
                    Some(v) => {
                        record.push(v.to_string());
                        record.push(if cell.extrapolated {
                            "extrapolated".to_string()
                        } else {
                            String::new()
                        });
                    }
                    None => {
                        record.push(String::new());
                        record.push(cell.error.clone().unwrap_or_default());
                    }
                }
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        debug!(
            "wrote sweep of {} oxides x {} temperatures to {}",
            self.oxide_names.len(),
            self.rows.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::OxideRegistry;
    use crate::tcexport::RawExport;
    use std::io::Cursor;

    fn sample_export() -> RawExport {
        let text = "T [K]\tGM [J/mol]\n1273\t-200000\n1373\t-190000\n1473\t-180000\n";
        RawExport::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_processed_table_conversions() {
        let table = ProcessedTable::from_export(&sample_export(), 0.5).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.t_k, 1273.0);
        assert_eq!(row.t_c, 1273.0 - 273.15);
        assert_eq!(row.gm_kj, row.gm_j / 1000.0);
        assert_eq!(row.dgf_kj_per_mol_o2, row.gm_kj / 0.5);
    }

    #[test]
    fn test_processed_table_rejects_bad_factor() {
        assert!(matches!(
            ProcessedTable::from_export(&sample_export(), 0.0),
            Err(TableError::NonPositiveFactor(_))
        ));
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cu2o_processed.csv");

        let table = ProcessedTable::from_export(&sample_export(), 0.5).unwrap();
        table.write_csv(&path).unwrap();
        let back = ProcessedTable::read_csv(&path).unwrap();
        assert_eq!(table, back);
    }

    #[test]
    fn test_sweep_records_error_markers() {
        let reg = OxideRegistry::builtin();
        let oxides: Vec<_> = reg.all().iter().collect();
        // 1873 K is above the cuprite assessment, and only Cu2O is assessed:
        // the polynomial sweep exercises both failure modes.
        let grid = TemperatureGrid::with_step(1273.0, 1873.0, 600.0).unwrap();
        let sweep = SweepTable::compute(
            &oxides,
            &grid,
            FormationModel::Polynomial,
            RangePolicy::Strict,
        );

        assert_eq!(sweep.rows.len(), 2);
        let cu2o = &sweep.rows[0].cells[0];
        assert!(cu2o.dgf_j_per_o2.is_some());
        let cu2o_hot = &sweep.rows[1].cells[0];
        assert!(cu2o_hot.dgf_j_per_o2.is_none());
        assert!(cu2o_hot.error.is_some());
        // Unassessed oxides fail at every temperature.
        let mgo_idx = sweep.oxide_names.iter().position(|n| n == "MgO").unwrap();
        assert_eq!(sweep.success_counts()[mgo_idx], 0);
    }

    #[test]
    fn test_sweep_csv_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");

        let reg = OxideRegistry::builtin();
        let cu2o = vec![reg.find("Cu2O").unwrap()];
        let grid = TemperatureGrid::with_step(1273.0, 1873.0, 600.0).unwrap();
        let sweep = SweepTable::compute(
            &cu2o,
            &grid,
            FormationModel::Polynomial,
            RangePolicy::Strict,
        );
        sweep.write_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "T_K,T_C,dG_Cu2O_per_O2,note_Cu2O");
        // Second data row is the out-of-range point: empty value, error note.
        let hot = lines.nth(1).unwrap();
        let cells: Vec<_> = hot.split(',').collect();
        assert_eq!(cells[2], "");
        assert!(cells[3].contains("outside assessed range"));
    }

    #[test]
    fn test_sweep_linear_full_coverage() {
        let reg = OxideRegistry::builtin();
        let oxides: Vec<_> = reg.all().iter().collect();
        let grid = TemperatureGrid::linspace(1000.0, 2100.0, 12).unwrap();
        let sweep = SweepTable::compute(
            &oxides,
            &grid,
            FormationModel::Linear,
            RangePolicy::Strict,
        );
        assert!(sweep.success_counts().iter().all(|&c| c == 12));
    }
}
