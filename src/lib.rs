//! # Ellingham - Oxide-Stability Screening Toolkit
//!
//! `ellingham` processes thermochemical exports and computes Ellingham-diagram
//! formation energies for a materials screening study: which ceramic oxides
//! (Al2O3, MgO, SiO2, TiO2) can pull copper contamination out of molten
//! recycled steel.
//!
//! ## Key Features
//!
//! - **Raw export processing**: Reads tab-separated Thermo-Calc exports with
//!   comment-prefixed headers, matches temperature and Gibbs-energy columns
//!   heuristically, and emits plot-ready CSV with unit conversions and
//!   per-mole-O2 normalization.
//!
//! - **Embedded model registry**: Linearized NIST/JANAF formation fits for
//!   the seven study oxides plus the assessed Cu-O CALPHAD expressions
//!   (Schramm 2005), so sweeps run without a commercial database seat.
//!
//! - **Honest range handling**: Piecewise expressions carry their assessed
//!   temperature ranges; evaluation beyond a phase transition either fails
//!   or is explicitly flagged as extrapolated, never silent.
//!
//! - **Best-effort sweeps**: A failure at one temperature becomes an error
//!   marker in that output cell and the sweep continues, matching how
//!   extraction runs against an external thermodynamic service behave.
//!
//! - **Provenance sidecars**: Every artifact gets a `.meta.json` recording
//!   tool version, command, source, and timestamp.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ellingham::formation::FormationModel;
//! use ellingham::gibbs::RangePolicy;
//! use ellingham::grid::TemperatureGrid;
//! use ellingham::species::OxideRegistry;
//! use ellingham::table::SweepTable;
//!
//! // Evaluate the whole registry over the extraction grid.
//! let registry = OxideRegistry::builtin();
//! let oxides: Vec<_> = registry.all().iter().collect();
//! let grid = TemperatureGrid::with_step(500.0, 2000.0, 50.0)?;
//!
//! let sweep = SweepTable::compute(
//!     &oxides,
//!     &grid,
//!     FormationModel::Linear,
//!     RangePolicy::Strict,
//! );
//! sweep.write_csv("oxide_gibbs_energies.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Processed Artifact Columns
//!
//! | Column | Unit | Description |
//! |--------|------|-------------|
//! | T_K | K | Temperature sample |
//! | T_C | C | Temperature in Celsius |
//! | GM_J | J/mol | Gibbs energy as exported |
//! | GM_kJ | kJ/mol | Gibbs energy in kilojoules |
//! | dGf_kJ_per_molO2 | kJ/mol O2 | Formation energy per mole O2 |
//!
//! Artifacts are plain CSV and can be plotted with any downstream tool:
//!
//! ```python
//! # Python
//! import pandas as pd
//! df = pd.read_csv("cu2o_dGf_1273-1873K_processed.csv")
//! df.plot(x="T_C", y="dGf_kJ_per_molO2")
//! ```
//!
//! ```r
//! # R
//! df <- read.csv("cu2o_dGf_1273-1873K_processed.csv")
//! ```
//!
//! ## Architecture
//!
//! - [`grid`]: immutable, strictly increasing temperature grids
//! - [`units`]: Kelvin/Celsius and J/kJ conversions, reference constants
//! - [`gibbs`]: linear and piecewise CALPHAD free-energy expressions
//! - [`species`]: the built-in oxide registry
//! - [`formation`]: formation energy per mole O2, the core operation
//! - [`tcexport`]: raw Thermo-Calc export parsing
//! - [`table`]: processed and sweep tables with CSV serialization
//! - [`rank`]: stability ordering at a temperature
//! - [`reaction`]: exchange-reaction screening (the sulfide route)
//! - [`validator`]: integrity checks for processed artifacts
//! - [`metadata`]: provenance sidecars

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod formation;
pub mod gibbs;
pub mod grid;
pub mod metadata;
pub mod rank;
pub mod reaction;
pub mod species;
pub mod table;
pub mod tcexport;
pub mod units;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::formation::{formation_per_mol_o2, Formation, FormationError, FormationModel};
    pub use crate::gibbs::{
        Evaluation, GibbsPolynomial, LinearGibbs, ModelError, PolySegment, RangePolicy,
    };
    pub use crate::grid::{GridError, TemperatureGrid};
    pub use crate::metadata::{GridSpec, MetadataError, RunProvenance};
    pub use crate::rank::{rank_at, RankedOxide, StabilityRanking};
    pub use crate::reaction::{ExchangeOutcome, ExchangeReaction, SpeciesGibbs};
    pub use crate::species::{Assessment, LineStyle, Oxide, OxideRegistry, PlotStyle};
    pub use crate::table::{
        ProcessedRow, ProcessedTable, SweepCell, SweepRow, SweepTable, TableError,
    };
    pub use crate::tcexport::{ExportError, GenericExport, RawExport};
    pub use crate::units::{
        celsius_to_kelvin, j_to_kj, kelvin_to_celsius, kj_to_j, STANDARD_PRESSURE_PA,
        STEELMAKING_T_K,
    };
    pub use crate::validator::{
        validate_processed_csv, CheckStatus, ValidationCheck, ValidationError, ValidationReport,
    };
}
