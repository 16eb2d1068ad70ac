//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use lwm2m_location::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show {
        /// Config file to read instead of ~/.lwm2m-location/config.ini
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file if none exists
    Init {
        /// Where to write the file instead of ~/.lwm2m-location/config.ini
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show { config } => run_show(config.as_deref()),
        ConfigCommands::Init { config } => run_init(config.as_deref()),
    }
}

/// The file a config command works on: `--config` if given, else the default.
fn resolve_path(config: Option<&Path>) -> PathBuf {
    config.map(Path::to_path_buf).unwrap_or_else(config_file_path)
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = resolve_path(config_path);
    let config = ConfigFile::load_from(&path)?;

    println!("Configuration Settings");
    println!("======================");
    if path.exists() {
        println!("(from {})", path.display());
    } else {
        println!("(defaults, {} not found)", path.display());
    }
    println!();
    println!("[source]");
    println!("  url = {}", config.source.url);
    println!("  timeout = {}", config.source.timeout);
    println!();
    println!("[refresh]");
    println!("  interval = {}", config.refresh.interval);
    println!();
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

fn run_init(config_path: Option<&Path>) -> Result<(), CliError> {
    let path = resolve_path(config_path);
    let existed = path.exists();
    let path = ConfigFile::ensure_exists_at(&path)?;

    if existed {
        println!("Configuration already exists at {}", path.display());
    } else {
        println!("Created default configuration at {}", path.display());
    }
    Ok(())
}
