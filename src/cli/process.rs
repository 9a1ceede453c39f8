use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use ellingham::metadata::RunProvenance;
use ellingham::species::OxideRegistry;
use ellingham::table::ProcessedTable;
use ellingham::tcexport::{GenericExport, RawExport};

use super::Config;

/// Process raw Thermo-Calc exports into plot-ready CSV artifacts.
pub fn run(
    inputs: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    o2_factor: Option<f64>,
    passthrough: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load(config.as_deref())?;
    let out_dir = out_dir
        .or_else(|| config.output.dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let registry = OxideRegistry::builtin();
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for input in &inputs {
        // Missing inputs are expected: export batches arrive incrementally
        // from the lab machine.
        if !input.exists() {
            warn!("Skipping {} (not found)", input.display());
            skipped += 1;
            continue;
        }

        let result = if passthrough {
            process_passthrough(input, &out_dir)
        } else {
            process_oxide(input, &out_dir, o2_factor, &registry)
        };

        match result {
            Ok(output) => {
                info!("Processed: {} -> {}", input.display(), output.display());
                processed += 1;
            }
            Err(e) => {
                warn!("Failed on {}: {e:#}", input.display());
                skipped += 1;
            }
        }
    }

    info!("Done: {processed} processed, {skipped} skipped");
    Ok(())
}

/// Convert a Gibbs-energy export: unit columns plus per-mole-O2
/// normalization, factor taken from the registry unless overridden.
fn process_oxide(
    input: &Path,
    out_dir: &Path,
    o2_factor: Option<f64>,
    registry: &OxideRegistry,
) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let oxide = registry.for_export_file(&file_name);
    let factor = match (o2_factor, oxide) {
        (Some(f), _) => f,
        (None, Some(oxide)) => {
            info!("{}: matched {} (O2 factor {})", file_name, oxide.name, oxide.o2_factor);
            oxide.o2_factor
        }
        (None, None) => anyhow::bail!(
            "cannot infer the oxide from '{file_name}'; pass --o2-factor or rename to a \
             registry prefix ({})",
            registry
                .names()
                .join(", ")
        ),
    };

    let export = RawExport::from_path(input)
        .with_context(|| format!("Failed to parse export {}", input.display()))?;
    if export.skipped_rows > 0 {
        warn!("{}: skipped {} unparseable rows", file_name, export.skipped_rows);
    }

    let table = ProcessedTable::from_export(&export, factor)?;
    let output = out_dir.join(processed_name(input));
    table
        .write_csv(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let mut provenance = RunProvenance::new(format!("process --o2-factor {factor}"))
        .with_source(file_name);
    if let Some(oxide) = oxide {
        provenance = provenance.with_database(oxide.source.to_string());
    }
    provenance.write_sidecar(&output)?;

    Ok(output)
}

/// Standardize an activity export: trim headers, re-emit every column as
/// comma-separated CSV, no normalization.
fn process_passthrough(input: &Path, out_dir: &Path) -> Result<PathBuf> {
    let export = GenericExport::from_path(input)
        .with_context(|| format!("Failed to parse export {}", input.display()))?;

    let output = out_dir.join(processed_name(input));
    export
        .write_csv(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    RunProvenance::new("process --passthrough")
        .with_source(input.file_name().unwrap_or_default().to_string_lossy())
        .write_sidecar(&output)?;

    Ok(output)
}

/// `cu2o_dGf_1273-1873K.txt` becomes `cu2o_dGf_1273-1873K_processed.csv`.
fn processed_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    format!("{stem}_processed.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_name() {
        assert_eq!(
            processed_name(Path::new("raw/cu2o_dGf_1273-1873K.txt")),
            "cu2o_dGf_1273-1873K_processed.csv"
        );
        assert_eq!(
            processed_name(Path::new("fe-cu_activity-vs-T_xcu003.txt")),
            "fe-cu_activity-vs-T_xcu003_processed.csv"
        );
    }
}
