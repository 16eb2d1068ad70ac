//! lwm2m-location CLI
//!
//! Runs the LwM2M location resource against an HTTP position source and
//! manages its configuration file.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lwm2m_location::config::MAX_REFRESH_INTERVAL_SECS;

use commands::config::ConfigCommands;
use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "lwm2m-location")]
#[command(version)]
#[command(about = "Observable LwM2M location resource backed by an HTTP position source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the position source and report changes until Ctrl-C
    Run {
        /// Position endpoint (overrides [source] url)
        #[arg(long)]
        url: Option<String>,

        /// Refresh interval in seconds (overrides [refresh] interval)
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(1..=MAX_REFRESH_INTERVAL_SECS)
        )]
        interval: Option<u64>,

        /// Config file to use instead of ~/.lwm2m-location/config.ini
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            url,
            interval,
            config,
            debug,
        } => commands::run::run(RunArgs {
            url,
            interval,
            config,
            debug,
        }),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "lwm2m-location",
            "run",
            "--url",
            "http://10.0.0.2:5000/get-location",
            "--interval",
            "5",
            "--debug",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                url,
                interval,
                config,
                debug,
            } => {
                assert_eq!(url.as_deref(), Some("http://10.0.0.2:5000/get-location"));
                assert_eq!(interval, Some(5));
                assert!(config.is_none());
                assert!(debug);
            }
            Commands::Config { .. } => panic!("expected run command"),
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = Cli::try_parse_from(["lwm2m-location", "run", "--interval", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_interval_above_one_day_rejected() {
        let result = Cli::try_parse_from(["lwm2m-location", "run", "--interval", "86401"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["lwm2m-location", "run", "--interval", "86400"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run {
                interval: Some(86_400),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["lwm2m-location", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show { config: None }
            }
        ));
    }

    #[test]
    fn test_parse_config_show_with_path() {
        let cli = Cli::try_parse_from([
            "lwm2m-location",
            "config",
            "show",
            "--config",
            "/tmp/custom.ini",
        ])
        .unwrap();

        match cli.command {
            Commands::Config {
                command: ConfigCommands::Show { config },
            } => assert_eq!(config, Some(PathBuf::from("/tmp/custom.ini"))),
            _ => panic!("expected config show"),
        }
    }
}
