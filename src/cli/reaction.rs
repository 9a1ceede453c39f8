use anyhow::Result;

use ellingham::reaction::ExchangeReaction;
use ellingham::units::STEELMAKING_T_K;

/// Screen the sulfide exchange reaction at one temperature.
pub fn run(temperature: Option<f64>) -> Result<()> {
    let t_k = temperature.unwrap_or(STEELMAKING_T_K);

    let rxn = ExchangeReaction::sulfide_exchange();
    let outcome = rxn.evaluate(t_k)?;

    println!("Exchange reaction: {}", rxn.equation);
    println!("  {} vs {}", rxn.product.name, rxn.reactant.name);
    println!("{outcome}");

    Ok(())
}
