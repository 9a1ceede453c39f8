use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use ellingham::formation::FormationModel;
use ellingham::gibbs::RangePolicy;
use ellingham::grid::TemperatureGrid;
use ellingham::metadata::{GridSpec, RunProvenance};
use ellingham::species::{Oxide, OxideRegistry};
use ellingham::table::SweepTable;

use super::Config;

// The extraction scripts' default grid.
const DEFAULT_T_MIN: f64 = 500.0;
const DEFAULT_T_MAX: f64 = 2000.0;
const DEFAULT_STEP: f64 = 50.0;

/// Evaluate the registry over a temperature grid and write the sweep CSV.
#[allow(clippy::too_many_arguments)]
pub fn run(
    model: FormationModel,
    t_min: Option<f64>,
    t_max: Option<f64>,
    step: Option<f64>,
    points: Option<usize>,
    oxides: Vec<String>,
    extrapolate: bool,
    output: PathBuf,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load(config.as_deref())?;

    let t_min = t_min.or(config.grid.t_min).unwrap_or(DEFAULT_T_MIN);
    let t_max = t_max.or(config.grid.t_max).unwrap_or(DEFAULT_T_MAX);
    let points = points.or(config.grid.points);
    let step = step.or(config.grid.step);

    let grid = match (points, step) {
        (Some(n), _) => TemperatureGrid::linspace(t_min, t_max, n),
        (None, Some(s)) => TemperatureGrid::with_step(t_min, t_max, s),
        (None, None) => TemperatureGrid::with_step(t_min, t_max, DEFAULT_STEP),
    }
    .context("Invalid temperature grid")?;

    let registry = OxideRegistry::builtin();
    let selected: Vec<&Oxide> = if oxides.is_empty() {
        registry.all().iter().collect()
    } else {
        registry.select(&oxides).map_err(|unknown| {
            anyhow::anyhow!(
                "unknown oxide '{unknown}'; registry has: {}",
                registry.names().join(", ")
            )
        })?
    };

    let policy = if extrapolate {
        RangePolicy::Extrapolate
    } else {
        RangePolicy::Strict
    };

    info!(
        "Computing {} formation energies for {} oxides over {}-{} K ({} points)",
        model.as_str(),
        selected.len(),
        grid.t_min(),
        grid.t_max(),
        grid.len()
    );

    let sweep = SweepTable::compute(&selected, &grid, model, policy);
    sweep
        .write_csv(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    for (name, count) in sweep.oxide_names.iter().zip(sweep.success_counts()) {
        info!("  {name}: {count}/{} temperatures", grid.len());
    }

    let citation = match model {
        FormationModel::Linear => "linearized NIST-JANAF / NIST WebBook fits",
        FormationModel::Polynomial => "Schramm et al. (2005) Cu-O reassessment (NIMS TDB)",
    };
    RunProvenance::new(format!("compute --model {}", model.as_str()))
        .with_database(citation)
        .with_grid(GridSpec {
            t_min: grid.t_min(),
            t_max: grid.t_max(),
            step: if points.is_none() { Some(step.unwrap_or(DEFAULT_STEP)) } else { None },
            points,
        })
        .write_sidecar(&output)?;

    info!("Wrote {} rows to {}", sweep.rows.len(), output.display());
    info!("Artifact is plain CSV and plots with any downstream tool:");
    info!("  - Python: pandas.read_csv('{}')", output.display());
    info!("  - R: read.csv('{}')", output.display());

    Ok(())
}
