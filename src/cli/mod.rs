use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ellingham::formation::FormationModel;

mod compute;
mod config;
mod info;
mod process;
mod rank;
mod reaction;
mod validate;

pub use config::Config;

/// Ellingham - Oxide-Stability Screening Toolkit
#[derive(Parser)]
#[command(name = "ellingham")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Free-energy description selector.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ModelArg {
    /// Linearized A + B*T tabulation fit (every oxide)
    #[default]
    Linear,
    /// Assessed piecewise CALPHAD expression (Cu-O system only)
    Polynomial,
}

impl From<ModelArg> for FormationModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Linear => FormationModel::Linear,
            ModelArg::Polynomial => FormationModel::Polynomial,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Process raw Thermo-Calc exports into plot-ready CSV
    Process {
        /// Input export files (tab-separated, #-prefixed comments)
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to the config value or the current directory)
        #[arg(short = 'd', long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Override the O2 normalization factor instead of inferring the
        /// oxide from the file name
        #[arg(long, value_name = "FACTOR")]
        o2_factor: Option<f64>,

        /// Standardize and re-emit every column without normalization
        /// (activity tables)
        #[arg(long)]
        passthrough: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Evaluate the oxide registry over a temperature grid
    Compute {
        /// Free-energy model to evaluate
        #[arg(short, long, default_value = "linear", value_enum)]
        model: ModelArg,

        /// Grid lower bound in Kelvin
        #[arg(long, value_name = "K")]
        t_min: Option<f64>,

        /// Grid upper bound in Kelvin
        #[arg(long, value_name = "K")]
        t_max: Option<f64>,

        /// Fixed step in Kelvin (mutually exclusive with --points)
        #[arg(long, value_name = "K", conflicts_with = "points")]
        step: Option<f64>,

        /// Number of evenly spaced points
        #[arg(long, value_name = "N")]
        points: Option<usize>,

        /// Oxides to evaluate (defaults to the whole registry)
        #[arg(long, value_name = "NAME", num_args = 1..)]
        oxides: Vec<String>,

        /// Flag-and-continue past assessed range bounds instead of
        /// recording an error marker
        #[arg(long)]
        extrapolate: bool,

        /// Output CSV path
        #[arg(short, long, value_name = "FILE", default_value = "oxide_gibbs_energies.csv")]
        output: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Rank oxide stability at a single temperature
    Rank {
        /// Temperature in Kelvin (defaults to 1873.15 K, 1600 C)
        #[arg(short, long, value_name = "K")]
        temperature: Option<f64>,

        /// Oxides to rank (defaults to the whole registry)
        #[arg(long, value_name = "NAME", num_args = 1..)]
        oxides: Vec<String>,

        /// Free-energy model to evaluate
        #[arg(short, long, default_value = "linear", value_enum)]
        model: ModelArg,

        /// Also write the ranking as CSV
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Screen the sulfide exchange reaction 2Cu + FeS -> Cu2S + Fe
    Reaction {
        /// Temperature in Kelvin (defaults to 1873.15 K, 1600 C)
        #[arg(short, long, value_name = "K")]
        temperature: Option<f64>,
    },

    /// Display the built-in oxide registry
    Info {
        /// Show one oxide in detail instead of the summary table
        #[arg(value_name = "OXIDE")]
        oxide: Option<String>,
    },

    /// Validate a processed CSV artifact
    Validate {
        /// Processed CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// O2 factor for the normalization check
        #[arg(long, value_name = "FACTOR", conflicts_with = "oxide")]
        o2_factor: Option<f64>,

        /// Look the O2 factor up from a registry oxide
        #[arg(long, value_name = "NAME")]
        oxide: Option<String>,
    },
}

impl Cli {
    /// The requested verbosity level.
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Initialize env_logger from the `-v` count.
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Run the selected subcommand.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            inputs,
            out_dir,
            o2_factor,
            passthrough,
            config,
        } => process::run(inputs, out_dir, o2_factor, passthrough, config),
        Commands::Compute {
            model,
            t_min,
            t_max,
            step,
            points,
            oxides,
            extrapolate,
            output,
            config,
        } => compute::run(
            model.into(),
            t_min,
            t_max,
            step,
            points,
            oxides,
            extrapolate,
            output,
            config,
        ),
        Commands::Rank {
            temperature,
            oxides,
            model,
            output,
        } => rank::run(temperature, oxides, model.into(), output),
        Commands::Reaction { temperature } => reaction::run(temperature),
        Commands::Info { oxide } => info::run(oxide),
        Commands::Validate {
            file,
            o2_factor,
            oxide,
        } => validate::run(file, o2_factor, oxide),
    }
}
