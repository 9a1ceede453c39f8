use anyhow::Result;

use ellingham::species::OxideRegistry;
use ellingham::units::STANDARD_PRESSURE_PA;

/// Display the built-in registry, whole or one oxide in detail.
pub fn run(oxide: Option<String>) -> Result<()> {
    let registry = OxideRegistry::builtin();

    let Some(name) = oxide else {
        print_summary(&registry);
        return Ok(());
    };

    let Some(oxide) = registry.find(&name) else {
        anyhow::bail!(
            "unknown oxide '{name}'; registry has: {}",
            registry.names().join(", ")
        );
    };

    println!("{}", oxide.name);
    println!("{}", "=".repeat(oxide.name.len()));
    println!("Reaction (per mol O2): {}", oxide.reaction);
    println!("O2 factor:             {} mol O2 per mol oxide", oxide.o2_factor);
    println!(
        "Linear fit:            dGf = {} + {}*T kJ/mol",
        oxide.linear.a, oxide.linear.b
    );
    println!("Linear fit source:     {}", oxide.source);
    match &oxide.assessment {
        Some(assessment) => {
            let (lo, hi) = assessment.compound.valid_range();
            println!("Assessment:            {lo}-{hi} K, {}", assessment.citation);
        }
        None => println!("Assessment:            none (linear fit only)"),
    }
    println!("Phase patterns:        {}", oxide.phase_patterns.join(", "));
    println!(
        "Plot style:            {} ({})",
        oxide.style.color,
        oxide.style.line.as_str()
    );
    println!("Export prefix:         {}_*", oxide.export_prefix);

    Ok(())
}

fn print_summary(registry: &OxideRegistry) {
    println!(
        "Oxide registry ({} entries, all at {} Pa)",
        registry.all().len(),
        STANDARD_PRESSURE_PA
    );
    println!(
        "{:<8}{:>10}{:>12}{:>10}  {:<11}{}",
        "Oxide", "O2 factor", "A (kJ/mol)", "B", "Assessed", "Reaction"
    );
    for oxide in registry.all() {
        let assessed = match &oxide.assessment {
            Some(a) => {
                let (lo, hi) = a.compound.valid_range();
                format!("{lo:.0}-{hi:.0} K")
            }
            None => "-".to_string(),
        };
        println!(
            "{:<8}{:>10}{:>12}{:>10}  {:<11}{}",
            oxide.name, oxide.o2_factor, oxide.linear.a, oxide.linear.b, assessed, oxide.reaction
        );
    }
}
