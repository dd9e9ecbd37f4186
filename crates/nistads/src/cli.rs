use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nistads")]
#[command(version)]
#[command(about = "Collect NIST adsorption isotherm data into tabular datasets")]
pub struct Cli {
    /// Data directory (defaults to $NISTADS_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (defaults to <data_dir>/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full collection pipeline
    Collect {
        /// Fraction of the guest index to fetch details for
        #[arg(long)]
        guest_fraction: Option<f64>,

        /// Fraction of the host index to fetch details for
        #[arg(long)]
        host_fraction: Option<f64>,

        /// Fraction of the isotherm index to fetch details for
        #[arg(long)]
        experiment_fraction: Option<f64>,

        /// Maximum number of requests in flight
        #[arg(long)]
        parallel_tasks: Option<usize>,
    },

    /// Check that the adsorption database is reachable
    Status,

    /// List species names found in the collected datasets
    Species,

    /// View collection run history
    History {
        /// Show statistics summary
        #[arg(long)]
        stats: bool,
    },

    /// Write a default configuration file
    Init,

    /// Print version information
    Version,
}
