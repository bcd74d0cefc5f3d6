//! Plugin management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use neoradar_host::{
    DiscoveredPlugin, HostConfig, LibraryReport, PluginHost, PluginState, VersionCheck,
    inspect_library,
};

/// Plugin management arguments
#[derive(Args)]
pub struct PluginArgs {
    #[command(subcommand)]
    pub command: PluginCommands,
}

/// Plugin subcommands
#[derive(Subcommand)]
pub enum PluginCommands {
    /// List plugins found in the plugin directories
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Read a plugin library's SDK version and metadata
    Inspect {
        /// Path to the plugin library (.so, .dylib or .dll)
        library: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Enable a plugin
    Enable {
        /// Plugin directory name
        name: String,
    },
    /// Disable a plugin
    Disable {
        /// Plugin directory name
        name: String,
    },
    /// Load, initialize and shut down every enabled plugin
    Check,
}

/// Run plugin command
pub fn run(args: PluginArgs, config: &HostConfig) -> Result<()> {
    let mut host = PluginHost::from_config(config);

    match args.command {
        PluginCommands::List { json } => list_plugins(&host, json),
        PluginCommands::Inspect { library, json } => inspect(&library, json),
        PluginCommands::Enable { name } => enable_plugin(&mut host, &name),
        PluginCommands::Disable { name } => disable_plugin(&mut host, &name),
        PluginCommands::Check => check_plugins(&mut host),
    }
}

fn list_plugins(host: &PluginHost, json: bool) -> Result<()> {
    let plugins = host.discover()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(());
    }

    if plugins.is_empty() {
        let dir = neoradar_paths::plugin_dir();
        println!("No plugins installed");
        println!();
        println!("Plugin directory: {}", dir.display());
        println!();
        println!("To install a plugin:");
        println!("  1. Create a plugin directory: mkdir -p {}/my-plugin", dir.display());
        println!(
            "  2. Copy the plugin library: cp libmy_plugin.so {}/my-plugin/my-plugin.so",
            dir.display()
        );
        println!("  3. Enable the plugin: neoradar plugin enable my-plugin");
        return Ok(());
    }

    println!("{}", plugin_table(&plugins));
    Ok(())
}

fn plugin_table(plugins: &[DiscoveredPlugin]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Plugin").fg(Color::Cyan),
        Cell::new("Enabled").fg(Color::Cyan),
        Cell::new("Library").fg(Color::Cyan),
    ]);

    for plugin in plugins {
        let enabled = if plugin.enabled {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no")
        };
        let library = plugin
            .library
            .as_deref()
            .map_or_else(|| "missing".to_string(), |p| p.display().to_string());
        table.add_row(vec![Cell::new(&plugin.name), enabled, Cell::new(library)]);
    }

    table
}

fn inspect(library: &Path, json: bool) -> Result<()> {
    let report = inspect_library(library)
        .with_context(|| format!("cannot inspect {}", library.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &LibraryReport) {
    println!("Library:     {}", report.path.display());
    println!("SDK version: {}", report.sdk_version);
    println!("Host SDK:    {}", neoradar_sdk::SDK_VERSION);
    println!("Status:      {}", describe(&report.compatibility));

    if let Some(m) = &report.metadata {
        println!();
        println!("Name:        {}", m.name);
        println!("Version:     {}", m.version);
        println!(
            "Author:      {}",
            if m.author.is_empty() {
                "Unknown"
            } else {
                &m.author
            }
        );
    }
}

fn describe(check: &VersionCheck) -> String {
    match check {
        VersionCheck::Compatible => "compatible".to_string(),
        VersionCheck::PatchMismatch { plugin, .. } => {
            format!("loadable (built against patch {})", plugin.patch)
        }
        VersionCheck::Incompatible { host, plugin } => {
            format!("incompatible (host {host}, plugin {plugin})")
        }
    }
}

fn enable_plugin(host: &mut PluginHost, name: &str) -> Result<()> {
    host.enable_plugin(name)?;
    println!("Enabled plugin: {}", name);
    println!("Run 'neoradar plugin check' to verify the plugin loads correctly.");
    Ok(())
}

fn disable_plugin(host: &mut PluginHost, name: &str) -> Result<()> {
    host.disable_plugin(name)?;
    println!("Disabled plugin: {}", name);
    Ok(())
}

fn check_plugins(host: &mut PluginHost) -> Result<()> {
    let loaded = host.load_all()?;
    let initialized = host.initialize_all();
    host.pump();
    host.shutdown_all();

    for p in host.list_plugins() {
        let status = match &p.state {
            PluginState::Loaded => "✓".to_string(),
            PluginState::Disabled { reason } => format!("○ {reason}"),
            PluginState::Failed { error } => format!("✗ {error}"),
        };
        println!("{} {}    {}", status, p.metadata, p.lifecycle);
    }

    println!();
    println!("{loaded} loaded, {initialized} initialized");
    Ok(())
}
