use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "neoradar", about = "Plugin tools for the NeoRadar ATC client")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Host configuration file, layered over the user config
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show host configuration
    Config(commands::config::ConfigArgs),
    /// Inspect and manage plugins
    Plugin(commands::plugin::PluginArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    // stdout carries command output, including --json
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = neoradar_host::HostConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Config(args) => commands::config::run(args, &config),
        Commands::Plugin(args) => commands::plugin::run(args, &config),
    }
}
