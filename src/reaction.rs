//! Exchange-reaction screening.
//!
//! Once the Ellingham comparison shows copper cannot reduce the candidate
//! oxides, the remaining thermodynamic lever is an exchange against a less
//! stable host compound. The study's example is the sulfide route,
//! `2Cu + FeS -> Cu2S + Fe`: both sulfides are modeled with linearized
//! fits and the reaction energy is the difference of the two formation
//! energies (the pure elements contribute zero).

use std::fmt;

use crate::gibbs::{LinearGibbs, ModelError};
use crate::units::kelvin_to_celsius;

/// A named species with a linearized formation fit, kJ/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesGibbs {
    /// Species name, e.g. "Cu2S".
    pub name: &'static str,
    /// Linearized formation fit in kJ/mol.
    pub model: LinearGibbs,
}

/// A one-for-one exchange reaction between two compounds of equal
/// stoichiometric class, `reactant -> product` with elements balancing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeReaction {
    /// Human-readable balanced equation.
    pub equation: &'static str,
    /// The host compound consumed by the exchange.
    pub reactant: SpeciesGibbs,
    /// The compound formed by the exchange.
    pub product: SpeciesGibbs,
}

/// The outcome of evaluating an exchange reaction at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeOutcome {
    /// Evaluation temperature in Kelvin.
    pub t_k: f64,
    /// Formation energy of the reactant compound, kJ/mol.
    pub dgf_reactant_kj: f64,
    /// Formation energy of the product compound, kJ/mol.
    pub dgf_product_kj: f64,
    /// Reaction energy, kJ/mol. Negative means favorable.
    pub dg_rxn_kj: f64,
}

impl ExchangeReaction {
    /// The study's sulfide exchange: `2Cu + FeS -> Cu2S + Fe`, with the
    /// temperature-dependent fits from the screening notebook.
    pub fn sulfide_exchange() -> Self {
        Self {
            equation: "2Cu + FeS -> Cu2S + Fe",
            reactant: SpeciesGibbs {
                name: "FeS",
                model: LinearGibbs::new(-150.0, 0.027),
            },
            product: SpeciesGibbs {
                name: "Cu2S",
                model: LinearGibbs::new(-180.0, 0.032),
            },
        }
    }

    /// Evaluate the exchange at `t_k` Kelvin.
    ///
    /// `dG_rxn = dGf(product) - dGf(reactant)`; the exchanged elements are
    /// in their reference states and contribute nothing.
    pub fn evaluate(&self, t_k: f64) -> Result<ExchangeOutcome, ModelError> {
        let dgf_reactant_kj = self.reactant.model.eval(t_k)?;
        let dgf_product_kj = self.product.model.eval(t_k)?;
        Ok(ExchangeOutcome {
            t_k,
            dgf_reactant_kj,
            dgf_product_kj,
            dg_rxn_kj: dgf_product_kj - dgf_reactant_kj,
        })
    }
}

impl ExchangeOutcome {
    /// Whether the exchange proceeds spontaneously at this temperature.
    pub fn is_favorable(&self) -> bool {
        self.dg_rxn_kj < 0.0
    }
}

impl fmt::Display for ExchangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "At {} K ({:.0} C):",
            self.t_k,
            kelvin_to_celsius(self.t_k)
        )?;
        writeln!(f, "  dGf(reactant) = {:>8.1} kJ/mol", self.dgf_reactant_kj)?;
        writeln!(f, "  dGf(product)  = {:>8.1} kJ/mol", self.dgf_product_kj)?;
        writeln!(f, "  dG_rxn        = {:>8.1} kJ/mol", self.dg_rxn_kj)?;
        if self.is_favorable() {
            write!(f, "  FAVORABLE: the product is the more stable compound")
        } else {
            write!(f, "  UNFAVORABLE: will not proceed spontaneously")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::STEELMAKING_T_K;

    #[test]
    fn test_sulfide_exchange_favorable_at_steelmaking() {
        let rxn = ExchangeReaction::sulfide_exchange();
        let outcome = rxn.evaluate(STEELMAKING_T_K).unwrap();
        // Cu2S is more stable than FeS across the melt range, so copper
        // displaces iron from the sulfide.
        assert!(outcome.is_favorable());
        assert!(outcome.dgf_product_kj < outcome.dgf_reactant_kj);
    }

    #[test]
    fn test_sulfide_exchange_documented_values() {
        let rxn = ExchangeReaction::sulfide_exchange();
        let outcome = rxn.evaluate(1873.0).unwrap();
        // FeS: -150 + 0.027*1873 = -99.429; Cu2S: -180 + 0.032*1873 = -120.064
        assert!((outcome.dgf_reactant_kj - (-99.429)).abs() < 1e-9);
        assert!((outcome.dgf_product_kj - (-120.064)).abs() < 1e-9);
        assert!((outcome.dg_rxn_kj - (-20.635)).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_nonpositive_temperature() {
        let rxn = ExchangeReaction::sulfide_exchange();
        assert!(matches!(
            rxn.evaluate(-1.0),
            Err(ModelError::NonPositiveTemperature(_))
        ));
    }
}
