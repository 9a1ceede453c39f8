use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use ellingham::formation::FormationModel;
use ellingham::gibbs::RangePolicy;
use ellingham::metadata::RunProvenance;
use ellingham::rank::rank_at;
use ellingham::species::{Oxide, OxideRegistry};
use ellingham::units::STEELMAKING_T_K;

/// Print (and optionally write) the stability ranking at one temperature.
pub fn run(
    temperature: Option<f64>,
    oxides: Vec<String>,
    model: FormationModel,
    output: Option<PathBuf>,
) -> Result<()> {
    let t_k = temperature.unwrap_or(STEELMAKING_T_K);
    anyhow::ensure!(t_k > 0.0, "temperature must be positive, got {t_k} K");

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

    let ranking = rank_at(&selected, t_k, model, RangePolicy::Strict);

    #[cfg(feature = "colorized_output")]
    println!("{}", ranking.format_colored());

    #[cfg(not(feature = "colorized_output"))]
    println!("{ranking}");

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writer.write_record(["rank", "oxide", "dGf_kJ_per_molO2", "reaction"])?;
        for entry in &ranking.entries {
            writer.write_record([
                entry.rank.to_string(),
                entry.name.clone(),
                entry.dgf_kj_per_o2.to_string(),
                entry.reaction.clone(),
            ])?;
        }
        writer.flush()?;

        RunProvenance::new(format!("rank --temperature {t_k} --model {}", model.as_str()))
            .write_sidecar(&path)?;
        info!("Wrote ranking to {}", path.display());
    }

    Ok(())
}
