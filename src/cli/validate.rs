use anyhow::Result;
use log::info;
use std::path::PathBuf;

use ellingham::species::OxideRegistry;
use ellingham::validator::validate_processed_csv;

/// Validate a processed CSV artifact and exit nonzero on failed checks.
pub fn run(file: PathBuf, o2_factor: Option<f64>, oxide: Option<String>) -> Result<()> {
    let factor = match (o2_factor, oxide) {
        (Some(f), _) => Some(f),
        (None, Some(name)) => {
            let registry = OxideRegistry::builtin();
            let Some(oxide) = registry.find(&name) else {
                anyhow::bail!(
                    "unknown oxide '{name}'; registry has: {}",
                    registry.names().join(", ")
                );
            };
            info!("using O2 factor {} from {}", oxide.o2_factor, oxide.name);
            Some(oxide.o2_factor)
        }
        (None, None) => None,
    };

    let report = validate_processed_csv(&file, factor)?;

    #[cfg(feature = "colorized_output")]
    println!("{}", report.format_colored());

    #[cfg(not(feature = "colorized_output"))]
    println!("{report}");

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
