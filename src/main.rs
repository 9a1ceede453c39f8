//! # Ellingham CLI
//!
//! A command-line tool for processing thermochemical exports and computing
//! Ellingham-diagram oxide formation energies.
//!
//! ## Usage
//!
//! ```bash
//! # Process raw Thermo-Calc exports into plot-ready CSV
//! ellingham process raw/cu2o_dGf_1273-1873K.txt raw/al2o3_dGf_1273-1873K.txt -d processed
//!
//! # Evaluate the built-in registry over a grid
//! ellingham compute --model linear --t-min 500 --t-max 2000 --step 50
//!
//! # Stability ranking at steelmaking temperature
//! ellingham rank --temperature 1873.15
//!
//! # Validate a processed artifact
//! ellingham validate processed/cu2o_dGf_1273-1873K_processed.csv --oxide Cu2O
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbosity());
    cli::dispatch(args)
}
