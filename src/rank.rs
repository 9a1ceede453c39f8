//! Oxide stability ranking at a single temperature.
//!
//! The Ellingham-diagram question in tabular form: at a given temperature,
//! order the oxides by formation energy per mole O2, most negative first.
//! The top entry is the most stable oxide; a metal can only reduce oxides
//! that rank above its own oxide. For this study the ordering settles the
//! central screening question: copper oxides rank last, so Cu cannot
//! reduce any of the candidate ceramics.

use std::fmt;

use log::warn;

use crate::formation::{formation_per_mol_o2, FormationModel};
use crate::gibbs::RangePolicy;
use crate::species::Oxide;
use crate::units::{j_to_kj, kelvin_to_celsius};

/// One ranked oxide.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOxide {
    /// 1-based stability rank; 1 is the most stable.
    pub rank: usize,
    /// Oxide name.
    pub name: String,
    /// Formation reaction per mole O2.
    pub reaction: String,
    /// Formation energy at the ranking temperature, kJ/mol O2.
    pub dgf_kj_per_o2: f64,
    /// Whether the value was extrapolated outside an assessed range.
    pub extrapolated: bool,
}

/// A stability ranking at one temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityRanking {
    /// Ranking temperature in Kelvin.
    pub t_k: f64,
    /// Entries ordered most stable first.
    pub entries: Vec<RankedOxide>,
    /// Oxides that could not be evaluated, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Rank `oxides` by per-mole-O2 formation energy at `t_k`.
///
/// Oxides whose evaluation fails are skipped with a logged reason rather
/// than failing the ranking.
pub fn rank_at(
    oxides: &[&Oxide],
    t_k: f64,
    model: FormationModel,
    policy: RangePolicy,
) -> StabilityRanking {
    let mut scored = Vec::new();
    let mut skipped = Vec::new();

    for oxide in oxides {
        match formation_per_mol_o2(oxide, t_k, model, policy) {
            Ok(f) => scored.push((oxide, f)),
            Err(e) => {
                warn!("ranking skips {}: {}", oxide.name, e);
                skipped.push((oxide.name.to_string(), e.to_string()));
            }
        }
    }

    scored.sort_by(|a, b| {
        a.1.dgf_j_per_o2
            .partial_cmp(&b.1.dgf_j_per_o2)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let entries = scored
        .into_iter()
        .enumerate()
        .map(|(i, (oxide, f))| RankedOxide {
            rank: i + 1,
            name: oxide.name.to_string(),
            reaction: oxide.reaction.to_string(),
            dgf_kj_per_o2: j_to_kj(f.dgf_j_per_o2),
            extrapolated: f.extrapolated,
        })
        .collect();

    StabilityRanking {
        t_k,
        entries,
        skipped,
    }
}

impl StabilityRanking {
    /// Whether `first` ranks strictly more stable than `second`. False when
    /// either name is absent from the ranking.
    pub fn more_stable(&self, first: &str, second: &str) -> bool {
        let pos = |name: &str| self.entries.iter().position(|e| e.name == name);
        match (pos(first), pos(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

impl fmt::Display for StabilityRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Oxide stability at {} K ({:.0} C), per mole O2:",
            self.t_k,
            kelvin_to_celsius(self.t_k)
        )?;
        writeln!(f, "{:<6}{:<8}{:>18}  {}", "Rank", "Oxide", "dGf (kJ/mol O2)", "Reaction")?;
        for entry in &self.entries {
            let flag = if entry.extrapolated { " *" } else { "" };
            writeln!(
                f,
                "{:<6}{:<8}{:>18.1}{}  {}",
                entry.rank, entry.name, entry.dgf_kj_per_o2, flag, entry.reaction
            )?;
        }
        if self.entries.iter().any(|e| e.extrapolated) {
            writeln!(f, "* extrapolated outside the assessed range")?;
        }
        for (name, reason) in &self.skipped {
            writeln!(f, "skipped {name}: {reason}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "colorized_output")]
impl StabilityRanking {
    /// Render the ranking with the most and least stable entries colored.
    pub fn format_colored(&self) -> String {
        use console::style;

        let mut out = format!(
            "Oxide stability at {} K ({:.0} C), per mole O2:\n",
            self.t_k,
            kelvin_to_celsius(self.t_k)
        );
        out.push_str(&format!(
            "{:<6}{:<8}{:>18}  {}\n",
            "Rank", "Oxide", "dGf (kJ/mol O2)", "Reaction"
        ));
        let last = self.entries.len().saturating_sub(1);
        for (i, entry) in self.entries.iter().enumerate() {
            let flag = if entry.extrapolated { " *" } else { "" };
            let line = format!(
                "{:<6}{:<8}{:>18.1}{}  {}",
                entry.rank, entry.name, entry.dgf_kj_per_o2, flag, entry.reaction
            );
            let line = if i == 0 {
                style(line).green().to_string()
            } else if i == last && last > 0 {
                style(line).yellow().to_string()
            } else {
                line
            };
            out.push_str(&line);
            out.push('\n');
        }
        for (name, reason) in &self.skipped {
            out.push_str(&format!("skipped {name}: {reason}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::OxideRegistry;
    use crate::units::STEELMAKING_T_K;

    #[test]
    fn test_steelmaking_ordering() {
        let reg = OxideRegistry::builtin();
        let oxides: Vec<_> = reg.all().iter().collect();
        let ranking = rank_at(
            &oxides,
            STEELMAKING_T_K,
            FormationModel::Linear,
            RangePolicy::Strict,
        );

        // The documented screening result: MgO above Al2O3 above Cu2O.
        assert!(ranking.more_stable("MgO", "Al2O3"));
        assert!(ranking.more_stable("Al2O3", "Cu2O"));
        // Copper oxides are the least stable of the set.
        let last_two: Vec<_> = ranking.entries[5..].iter().map(|e| e.name.as_str()).collect();
        assert!(last_two.contains(&"Cu2O"));
        assert!(last_two.contains(&"CuO"));
    }

    #[test]
    fn test_rank_values_are_per_o2() {
        let reg = OxideRegistry::builtin();
        let cu2o = vec![reg.find("Cu2O").unwrap()];
        let ranking = rank_at(&cu2o, 1873.0, FormationModel::Linear, RangePolicy::Strict);
        assert_eq!(ranking.entries.len(), 1);
        assert!((ranking.entries[0].dgf_kj_per_o2 - (-59.05)).abs() < 1e-9);
    }

    #[test]
    fn test_failed_oxides_are_skipped() {
        let reg = OxideRegistry::builtin();
        let oxides: Vec<_> = reg.all().iter().collect();
        // Polynomial model above the cuprite range: everything is skipped,
        // nothing panics.
        let ranking = rank_at(
            &oxides,
            1873.0,
            FormationModel::Polynomial,
            RangePolicy::Strict,
        );
        assert!(ranking.entries.is_empty());
        assert_eq!(ranking.skipped.len(), 7);
    }

    #[test]
    fn test_more_stable_unknown_name() {
        let reg = OxideRegistry::builtin();
        let oxides: Vec<_> = reg.all().iter().collect();
        let ranking = rank_at(&oxides, 1873.0, FormationModel::Linear, RangePolicy::Strict);
        assert!(!ranking.more_stable("MgO", "ZrO2"));
    }

    #[test]
    fn test_display_contains_header() {
        let reg = OxideRegistry::builtin();
        let oxides: Vec<_> = reg.all().iter().collect();
        let ranking = rank_at(&oxides, 1873.0, FormationModel::Linear, RangePolicy::Strict);
        let rendered = ranking.to_string();
        assert!(rendered.contains("Rank"));
        assert!(rendered.contains("MgO"));
    }
}
