//! Validation of processed CSV artifacts.
//!
//! Processed tables get edited, re-exported and passed between tools during
//! a study, so the validator re-checks the contract a well-formed artifact
//! must satisfy before it is plotted or cited:
//!
//! 1. **Header contract**: the five processed columns are present.
//! 2. **Row integrity**: every row parses into numbers.
//! 3. **Temperature axis**: strictly increasing, all samples above 0 K.
//! 4. **Unit consistency**: `T_C = T_K - 273.15` and `GM_kJ = GM_J / 1000`
//!    for every row.
//! 5. **Normalization**: when the O2 factor is supplied,
//!    `dGf_kJ_per_molO2 = GM_kJ / factor` for every row.
//!
//! The report lists each named check as passed, warning, or failed.

use std::fmt;
use std::path::Path;

use crate::table::{ProcessedTable, TableError};
use crate::units::{J_PER_KJ, KELVIN_OFFSET};

/// Absolute slack allowed on unit-consistency comparisons, in the units of
/// the compared column.
const ABS_TOLERANCE: f64 = 1e-9;

/// Relative slack allowed on unit-consistency comparisons.
const REL_TOLERANCE: f64 = 1e-9;

/// Errors that prevent validation from running at all.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The artifact could not be read or parsed as a processed table.
    #[error("cannot read artifact: {0}")]
    Unreadable(#[from] TableError),
}

/// Result of a single validation check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// The check passed.
    Ok,
    /// The check passed with a caveat.
    Warning(String),
    /// The check failed.
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// A named validation check and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationCheck {
    /// Short name of the check.
    pub name: String,
    /// Outcome.
    pub status: CheckStatus,
}

impl ValidationCheck {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Full validation report for one artifact.
#[derive(Debug)]
pub struct ValidationReport {
    /// The checks in execution order.
    pub checks: Vec<ValidationCheck>,
    /// Path of the validated artifact.
    pub file_path: String,
}

impl ValidationReport {
    fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    fn add(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Whether any check failed.
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Count of passed checks.
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Count of warnings.
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .count()
    }

    /// Count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed-table validation")?;
        writeln!(f, "==========================")?;
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(f)?;

        for check in &self.checks {
            let symbol = match &check.status {
                CheckStatus::Ok => "ok",
                CheckStatus::Warning(_) => "warn",
                CheckStatus::Failed(_) => "FAIL",
            };
            write!(f, "[{:>4}] {}", symbol, check.name)?;
            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - {msg}")?,
                CheckStatus::Failed(msg) => writeln!(f, " - {msg}")?,
            }
        }

        writeln!(f)?;
        write!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )
    }
}

#[cfg(feature = "colorized_output")]
impl ValidationReport {
    /// Render the report with colored status markers.
    pub fn format_colored(&self) -> String {
        use console::style;

        let mut out = String::new();
        out.push_str("Processed-table validation\n");
        out.push_str("==========================\n");
        out.push_str(&format!("File: {}\n\n", self.file_path));

        for check in &self.checks {
            let line = match &check.status {
                CheckStatus::Ok => format!("[{}] {}", style("ok").green(), check.name),
                CheckStatus::Warning(msg) => {
                    format!("[{}] {} - {}", style("warn").yellow(), check.name, msg)
                }
                CheckStatus::Failed(msg) => {
                    format!("[{}] {} - {}", style("FAIL").red().bold(), check.name, msg)
                }
            };
            out.push_str(&line);
            out.push('\n');
        }

        out.push_str(&format!(
            "\nSummary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        ));
        out
    }
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= ABS_TOLERANCE + REL_TOLERANCE * expected.abs()
}

/// Validate a processed CSV artifact.
///
/// `o2_factor`, when supplied, enables the normalization check against
/// `GM_kJ / factor`.
pub fn validate_processed_csv(
    path: &Path,
    o2_factor: Option<f64>,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(path.display().to_string());

    let table = match ProcessedTable::read_csv(path) {
        Ok(t) => {
            report.add(ValidationCheck::ok("Header contract and row parsing"));
            t
        }
        Err(e) => {
            report.add(ValidationCheck::failed(
                "Header contract and row parsing",
                e.to_string(),
            ));
            return Ok(report);
        }
    };

    if table.rows.is_empty() {
        report.add(ValidationCheck::failed("Non-empty table", "no data rows"));
        return Ok(report);
    }
    report.add(ValidationCheck::ok("Non-empty table"));

    // Temperature axis.
    let positive = table.rows.iter().all(|r| r.t_k > 0.0);
    if positive {
        report.add(ValidationCheck::ok("Temperatures positive"));
    } else {
        report.add(ValidationCheck::failed(
            "Temperatures positive",
            "found a sample at or below 0 K",
        ));
    }

    let monotonic = table.rows.windows(2).all(|w| w[0].t_k < w[1].t_k);
    if monotonic {
        report.add(ValidationCheck::ok("Temperature strictly increasing"));
    } else {
        report.add(ValidationCheck::failed(
            "Temperature strictly increasing",
            "temperature column is not strictly increasing",
        ));
    }

    // Unit consistency.
    let celsius_bad = table
        .rows
        .iter()
        .position(|r| !close(r.t_c, r.t_k - KELVIN_OFFSET));
    match celsius_bad {
        None => report.add(ValidationCheck::ok("Celsius consistency")),
        Some(i) => report.add(ValidationCheck::failed(
            "Celsius consistency",
            format!("row {}: T_C does not equal T_K - 273.15", i + 1),
        )),
    }

    let kj_bad = table
        .rows
        .iter()
        .position(|r| !close(r.gm_kj, r.gm_j / J_PER_KJ));
    match kj_bad {
        None => report.add(ValidationCheck::ok("Kilojoule consistency")),
        Some(i) => report.add(ValidationCheck::failed(
            "Kilojoule consistency",
            format!("row {}: GM_kJ does not equal GM_J / 1000", i + 1),
        )),
    }

    // Normalization, only when the caller knows the factor.
    match o2_factor {
        Some(factor) if factor > 0.0 => {
            let bad = table
                .rows
                .iter()
                .position(|r| !close(r.dgf_kj_per_mol_o2, r.gm_kj / factor));
            match bad {
                None => report.add(ValidationCheck::ok("Per-mole-O2 normalization")),
                Some(i) => report.add(ValidationCheck::failed(
                    "Per-mole-O2 normalization",
                    format!(
                        "row {}: dGf_kJ_per_molO2 does not equal GM_kJ / {factor}",
                        i + 1
                    ),
                )),
            }
        }
        Some(factor) => report.add(ValidationCheck::failed(
            "Per-mole-O2 normalization",
            format!("supplied O2 factor {factor} is not positive"),
        )),
        None => report.add(ValidationCheck::warning(
            "Per-mole-O2 normalization",
            "skipped: no O2 factor supplied",
        )),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tcexport::RawExport;
    use std::io::Cursor;

    fn write_sample(dir: &tempfile::TempDir, o2_factor: f64) -> std::path::PathBuf {
        let text = "T [K]\tGM [J/mol]\n1273\t-200000\n1373\t-190000\n1473\t-180000\n";
        let export = RawExport::from_reader(Cursor::new(text)).unwrap();
        let table = ProcessedTable::from_export(&export, o2_factor).unwrap();
        let path = dir.path().join("sample_processed.csv");
        table.write_csv(&path).unwrap();
        path
    }

    #[test]
    fn test_well_formed_artifact_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, 0.5);
        let report = validate_processed_csv(&path, Some(0.5)).unwrap();
        assert!(!report.has_failures(), "{report}");
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_no_factor_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, 0.5);
        let report = validate_processed_csv(&path, None).unwrap();
        assert!(!report.has_failures());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_wrong_factor_fails_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, 0.5);
        let report = validate_processed_csv(&path, Some(1.5)).unwrap();
        assert!(report.has_failures());
    }

    #[test]
    fn test_corrupted_kilojoules_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(&dir, 0.5);

        // Rewrite the first data row with an inconsistent GM_kJ cell.
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines: Vec<String> = content.lines().map(String::from).collect();
        lines[1] = "1273,999.85,-200000,-321.5,-400".to_string();
        std::fs::write(&path, lines.join("\n")).unwrap();

        let report = validate_processed_csv(&path, None).unwrap();
        assert!(report.has_failures());
    }

    #[test]
    fn test_non_monotonic_temperature_fails() {
        let dir = tempfile::tempdir().unwrap();
        let text = "T [K]\tGM [J/mol]\n1473\t-180000\n1273\t-200000\n";
        let export = RawExport::from_reader(Cursor::new(text)).unwrap();
        let table = ProcessedTable::from_export(&export, 0.5).unwrap();
        let path = dir.path().join("backwards.csv");
        table.write_csv(&path).unwrap();

        let report = validate_processed_csv(&path, Some(0.5)).unwrap();
        assert!(report.has_failures());
        let failed: Vec<_> = report
            .checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(failed, vec!["Temperature strictly increasing"]);
    }

    #[test]
    fn test_missing_file_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let report = validate_processed_csv(&path, None).unwrap();
        assert!(report.has_failures());
    }
}
