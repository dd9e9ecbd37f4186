mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::collect::CollectOverrides;
use nistads_store::Paths;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => Paths::with_root(dir),
        None => Paths::new()?,
    };
    let config_path = cli.config.unwrap_or_else(|| paths.config_file());

    match cli.command {
        Commands::Collect {
            guest_fraction,
            host_fraction,
            experiment_fraction,
            parallel_tasks,
        } => {
            let overrides = CollectOverrides {
                guest_fraction,
                host_fraction,
                experiment_fraction,
                parallel_tasks,
            };
            commands::collect::run(&paths, &config_path, &overrides)
        }
        Commands::Status => commands::status::run(&config_path),
        Commands::Species => commands::species::run(&paths),
        Commands::History { stats } => commands::history::run(&paths, stats),
        Commands::Init => commands::init::run(&paths, &config_path),
        Commands::Version => commands::version::run(),
    }
}
