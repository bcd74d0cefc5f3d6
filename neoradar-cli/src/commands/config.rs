use anyhow::Result;
use clap::{Args, Subcommand};
use neoradar_host::HostConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration and data paths
    Path,
}

pub fn run(args: ConfigArgs, config: &HostConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(config),
        ConfigCommands::Path => show_paths(config),
    }
}

fn show_config(config: &HostConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{}", toml_str);
    Ok(())
}

fn show_paths(config: &HostConfig) -> Result<()> {
    println!("User config: {:?}", HostConfig::user_config_path());
    println!("Registry:    {:?}", config.plugin_host_config().registry_path);
    println!("Documents:   {:?}", config.client.documents_path);
    println!("Data:        {:?}", neoradar_paths::data_dir());
    for dir in &config.plugin_dirs {
        println!("Plugins:     {:?}", dir);
    }
    Ok(())
}
