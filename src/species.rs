//! The oxide registry: candidate ceramics and reference oxides.
//!
//! Each entry carries everything a sweep or ranking needs: the formation
//! reaction written per mole O2, the stoichiometric normalization factor,
//! the linearized tabulation fit, an optional assessed CALPHAD expression,
//! the Thermo-Calc phase-name patterns used to recognize raw exports, and
//! plot styling for downstream charting.
//!
//! Linearized coefficients come from NIST-JANAF / NIST WebBook tabulations
//! (enthalpy intercepts) with entropy-estimated slopes; the assessed Cu-O
//! expressions follow the Schramm et al. (2005) reassessment as distributed
//! in TDB form by NIMS.

use crate::gibbs::{GibbsPolynomial, LinearGibbs, PolySegment};

/// Line style hint for downstream plotting of a sweep series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Solid line.
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

impl LineStyle {
    /// The conventional matplotlib-style name for the dash pattern.
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }
}

/// Plot styling carried alongside each oxide for chart-ready exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotStyle {
    /// Hex RGB color.
    pub color: &'static str,
    /// Dash pattern.
    pub line: LineStyle,
}

/// An assessed CALPHAD description of an oxide and its metal reference.
///
/// Formation is computed as `G(compound) - metal_per_formula * G(reference)`
/// per mole of compound formula unit; the O2 gas reference is folded into
/// the compound expression (SER reference, G_O2 = 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Gibbs energy of the compound phase, J/mol of formula unit.
    pub compound: GibbsPolynomial,
    /// Gibbs energy of the pure-metal reference state, J/mol of atoms.
    pub reference: GibbsPolynomial,
    /// Moles of metal atoms per mole of compound formula unit.
    pub metal_per_formula: f64,
    /// Moles of O2 consumed per mole of compound formula unit.
    pub o2_per_formula: f64,
    /// Literature source of the assessment.
    pub citation: &'static str,
}

/// One oxide record in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Oxide {
    /// Display name, e.g. "Al2O3".
    pub name: &'static str,
    /// Lowercase filename prefix of raw Thermo-Calc exports, e.g. "al2o3".
    pub export_prefix: &'static str,
    /// Formation reaction normalized to one mole of O2.
    pub reaction: &'static str,
    /// Moles of O2 consumed per mole of oxide formed. Always positive.
    pub o2_factor: f64,
    /// Moles of metal consumed per mole of O2 in the normalized reaction.
    pub metal_per_o2: f64,
    /// Moles of oxide produced per mole of O2 in the normalized reaction.
    pub oxide_per_o2: f64,
    /// Linearized formation fit, kJ/mol of oxide.
    pub linear: LinearGibbs,
    /// Assessed CALPHAD description, where one exists for the study.
    pub assessment: Option<Assessment>,
    /// Thermo-Calc phase names matched when reading raw exports, in
    /// priority order.
    pub phase_patterns: &'static [&'static str],
    /// Styling for chart-ready exports.
    pub style: PlotStyle,
    /// Source of the linearized coefficients.
    pub source: &'static str,
}

/// The built-in set of study oxides.
#[derive(Debug, Clone)]
pub struct OxideRegistry {
    oxides: Vec<Oxide>,
}

/// GHSERCU: the SGTE reference state of pure copper, with its 1358 K
/// melting-point break.
fn ghsercu() -> GibbsPolynomial {
    GibbsPolynomial::new(vec![
        PolySegment {
            t_min: 298.15,
            t_max: 1358.0,
            a: -7770.458,
            b: 130.485_235,
            c: -24.112_392,
            d: -0.002_656_84,
            e: 1.292_23e-7,
            f: 52478.0,
        },
        PolySegment {
            t_min: 1358.0,
            t_max: 3200.0,
            a: -13542.026,
            b: 183.803_828,
            c: -31.38,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        },
    ])
    .expect("GHSERCU segments are well-formed")
}

/// Cuprite (Cu2O) per the Schramm 2005 reassessment, up to its melting
/// point near 1517 K.
fn cuprite() -> GibbsPolynomial {
    GibbsPolynomial::new(vec![PolySegment {
        t_min: 298.15,
        t_max: 1517.0,
        a: -193_230.0,
        b: 360.057,
        c: -66.26,
        d: -0.007_96,
        e: 0.0,
        f: 374_000.0,
    }])
    .expect("cuprite segment is well-formed")
}

impl OxideRegistry {
    /// The seven oxides of the screening study: the candidate ceramics
    /// (Al2O3, MgO, SiO2, TiO2) plus the copper and iron references.
    pub fn builtin() -> Self {
        let oxides = vec![
            Oxide {
                name: "Cu2O",
                export_prefix: "cu2o",
                reaction: "4Cu + O2 -> 2Cu2O",
                o2_factor: 0.5,
                metal_per_o2: 4.0,
                oxide_per_o2: 2.0,
                linear: LinearGibbs::new(-170.0, 0.075),
                assessment: Some(Assessment {
                    compound: cuprite(),
                    reference: ghsercu(),
                    metal_per_formula: 2.0,
                    o2_per_formula: 0.5,
                    citation: "Schramm et al. (2005), J. Phase Equilib. Diff. 26:605 (NIMS TDB)",
                }),
                phase_patterns: &["CUPRITE", "CU2O"],
                style: PlotStyle {
                    color: "#0077BB",
                    line: LineStyle::Solid,
                },
                source: "Holmes et al. (1989), J. Chem. Thermodynamics 21:351",
            },
            Oxide {
                name: "CuO",
                export_prefix: "cuo",
                reaction: "2Cu + O2 -> 2CuO",
                o2_factor: 0.5,
                metal_per_o2: 2.0,
                oxide_per_o2: 2.0,
                linear: LinearGibbs::new(-155.0, 0.085),
                assessment: None,
                phase_patterns: &["CUO", "TENORITE"],
                style: PlotStyle {
                    color: "#56B4E9",
                    line: LineStyle::Dashed,
                },
                source: "NIST-JANAF (tenorite)",
            },
            Oxide {
                name: "FeO",
                export_prefix: "feo",
                reaction: "2Fe + O2 -> 2FeO",
                o2_factor: 0.5,
                metal_per_o2: 2.0,
                oxide_per_o2: 2.0,
                linear: LinearGibbs::new(-264.0, 0.065),
                assessment: None,
                // FeO takes the halite structure; wustite is non-stoichiometric.
                phase_patterns: &["HALITE", "FEO", "WUSTITE"],
                style: PlotStyle {
                    color: "#EE7733",
                    line: LineStyle::Dashed,
                },
                source: "NIST-JANAF (wustite)",
            },
            Oxide {
                name: "Al2O3",
                export_prefix: "al2o3",
                reaction: "4/3Al + O2 -> 2/3Al2O3",
                o2_factor: 1.5,
                metal_per_o2: 4.0 / 3.0,
                oxide_per_o2: 2.0 / 3.0,
                linear: LinearGibbs::new(-1676.0, 0.32),
                assessment: None,
                phase_patterns: &["CORUNDUM", "AL2O3"],
                style: PlotStyle {
                    color: "#AA3377",
                    line: LineStyle::Dotted,
                },
                source: "NIST WebBook (alpha-corundum)",
            },
            Oxide {
                name: "MgO",
                export_prefix: "mgo",
                reaction: "2Mg + O2 -> 2MgO",
                o2_factor: 0.5,
                metal_per_o2: 2.0,
                oxide_per_o2: 2.0,
                linear: LinearGibbs::new(-601.0, 0.11),
                assessment: None,
                phase_patterns: &["HALITE", "MGO", "PERICLASE"],
                style: PlotStyle {
                    color: "#009988",
                    line: LineStyle::Solid,
                },
                source: "NIST-JANAF (periclase)",
            },
            Oxide {
                name: "SiO2",
                export_prefix: "sio2",
                reaction: "Si + O2 -> SiO2",
                o2_factor: 1.0,
                metal_per_o2: 1.0,
                oxide_per_o2: 1.0,
                linear: LinearGibbs::new(-910.0, 0.18),
                assessment: None,
                phase_patterns: &["QUARTZ", "SIO2", "TRIDYMITE", "CRISTOBALITE"],
                style: PlotStyle {
                    color: "#CC3311",
                    line: LineStyle::Dashed,
                },
                source: "NIST-JANAF (alpha-quartz)",
            },
            Oxide {
                name: "TiO2",
                export_prefix: "tio2",
                reaction: "Ti + O2 -> TiO2",
                o2_factor: 1.0,
                metal_per_o2: 1.0,
                oxide_per_o2: 1.0,
                linear: LinearGibbs::new(-944.0, 0.18),
                assessment: None,
                phase_patterns: &["RUTILE", "TIO2", "ANATASE"],
                style: PlotStyle {
                    color: "#E69F00",
                    line: LineStyle::Dotted,
                },
                source: "NIST-JANAF (rutile)",
            },
        ];
        Self { oxides }
    }

    /// All registered oxides, in registry order.
    pub fn all(&self) -> &[Oxide] {
        &self.oxides
    }

    /// Look up an oxide by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&Oxide> {
        self.oxides
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
    }

    /// Select a subset by name, preserving registry order. An unknown name
    /// yields an error naming it.
    pub fn select(&self, names: &[String]) -> Result<Vec<&Oxide>, String> {
        for n in names {
            if self.find(n).is_none() {
                return Err(n.clone());
            }
        }
        Ok(self
            .oxides
            .iter()
            .filter(|o| names.iter().any(|n| o.name.eq_ignore_ascii_case(n)))
            .collect())
    }

    /// Match a raw export file name against the registry prefixes, e.g.
    /// `cu2o_dGf_1273-1873K.txt` resolves to Cu2O.
    ///
    /// Longer prefixes win so that `cu2o_...` is not claimed by CuO.
    pub fn for_export_file(&self, file_name: &str) -> Option<&Oxide> {
        let stem = file_name.to_ascii_lowercase();
        self.oxides
            .iter()
            .filter(|o| stem.starts_with(o.export_prefix))
            .max_by_key(|o| o.export_prefix.len())
    }

    /// Names of all registered oxides.
    pub fn names(&self) -> Vec<&'static str> {
        self.oxides.iter().map(|o| o.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contents() {
        let reg = OxideRegistry::builtin();
        assert_eq!(reg.all().len(), 7);
        assert_eq!(
            reg.names(),
            vec!["Cu2O", "CuO", "FeO", "Al2O3", "MgO", "SiO2", "TiO2"]
        );
    }

    #[test]
    fn test_o2_factors_positive() {
        for oxide in OxideRegistry::builtin().all() {
            assert!(oxide.o2_factor > 0.0, "{} factor", oxide.name);
            assert!(oxide.metal_per_o2 > 0.0);
            assert!(oxide.oxide_per_o2 > 0.0);
        }
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let reg = OxideRegistry::builtin();
        assert_eq!(reg.find("al2o3").unwrap().name, "Al2O3");
        assert_eq!(reg.find("MGO").unwrap().o2_factor, 0.5);
        assert!(reg.find("ZrO2").is_none());
    }

    #[test]
    fn test_export_file_matching() {
        let reg = OxideRegistry::builtin();
        assert_eq!(
            reg.for_export_file("cu2o_dGf_1273-1873K.txt").unwrap().name,
            "Cu2O"
        );
        assert_eq!(
            reg.for_export_file("cuo_dGf_1273-1873K.txt").unwrap().name,
            "CuO"
        );
        assert_eq!(
            reg.for_export_file("AL2O3_dGf_1273-1873K.txt").unwrap().name,
            "Al2O3"
        );
        assert!(reg.for_export_file("fe-cu_activity-vs-T.txt").is_none());
    }

    #[test]
    fn test_select_subset() {
        let reg = OxideRegistry::builtin();
        let picked = reg
            .select(&["MgO".to_string(), "cu2o".to_string()])
            .unwrap();
        // Registry order is preserved regardless of request order.
        assert_eq!(picked[0].name, "Cu2O");
        assert_eq!(picked[1].name, "MgO");

        assert_eq!(reg.select(&["ZrO2".to_string()]).unwrap_err(), "ZrO2");
    }

    #[test]
    fn test_only_cu2o_assessed() {
        let reg = OxideRegistry::builtin();
        let assessed: Vec<_> = reg
            .all()
            .iter()
            .filter(|o| o.assessment.is_some())
            .map(|o| o.name)
            .collect();
        assert_eq!(assessed, vec!["Cu2O"]);
    }

    #[test]
    fn test_cuprite_assessment_range() {
        let reg = OxideRegistry::builtin();
        let assessment = reg.find("Cu2O").unwrap().assessment.as_ref().unwrap();
        let (lo, hi) = assessment.compound.valid_range();
        assert_eq!(lo, 298.15);
        assert_eq!(hi, 1517.0);
    }
}
