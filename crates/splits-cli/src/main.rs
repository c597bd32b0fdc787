use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use splits_cli::commands::{list, play, show, util};
use splits_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries the timer display
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::List { dir }) => {
            let dir = dir.as_deref().unwrap_or(&config.runs_dir);
            list::run(&mut std::io::stdout().lock(), dir, &config.extension)?;
        }
        Some(Commands::Show { run, json }) => {
            let path = util::resolve_run(&config, run);
            show::run(&mut std::io::stdout().lock(), &path, *json)?;
        }
        Some(Commands::Play { run }) => {
            let path = util::resolve_run(&config, run);
            play::run(&config, &path)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
