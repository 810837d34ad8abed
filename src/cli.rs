//! CLI definitions and entry point

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands;
use firewatch::config::Config;
use firewatch::output::OutputMode;

/// firewatch - Fire-extinguisher compliance tracking
#[derive(Parser, Debug)]
#[command(
    name = "firewatch",
    version,
    about = "Fire-extinguisher compliance tracking",
    long_about = "Track fire extinguishers and their periodic inspections.\n\n\
                  Scanning an asset shows it read-only to the public, editable to\n\
                  authenticated inspectors, and locked for 48 hours after each inspection."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./firewatch.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token identifying the caller
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter firewatch.toml with an admin token
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage the asset register
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Show an asset and the caller's access mode
    Status {
        /// Asset ID or serial number
        asset: String,
    },

    /// Record an inspection
    Inspect {
        /// Asset ID or serial number
        asset: String,

        /// Inspection type: monthly, quarterly, annual
        #[arg(short = 't', long = "type", default_value = "quarterly")]
        inspection_type: String,

        /// Overall observation (e.g. "Ok", "Non-Operational")
        #[arg(long)]
        observation: Option<String>,

        /// Free-form remarks
        #[arg(short, long)]
        remarks: Option<String>,

        /// Date the unit is due for refilling (YYYY-MM-DD)
        #[arg(long)]
        due_for_refilling: Option<NaiveDate>,
    },

    /// Show inspection history of an asset
    History {
        /// Asset ID or serial number
        asset: String,
    },

    /// Inspection counts for the last seven days
    Stats,

    /// Fleet-wide status counts
    Summary,

    /// Show recent writes, newest first (admin)
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum AssetAction {
    /// Register an asset (admin)
    Add {
        /// Serial number
        serial: String,

        /// Extinguishing agent (CO2, ABC, Water, ...)
        #[arg(long)]
        kind: String,

        /// Rated capacity (2kg, 9L, ...)
        #[arg(long)]
        capacity: String,

        /// Mount location
        #[arg(long)]
        location: String,

        /// Manufacturer
        #[arg(long)]
        make: Option<String>,

        /// Year of manufacture
        #[arg(long)]
        year: Option<i32>,
    },

    /// List active assets
    List,

    /// Retire an asset (admin)
    Remove {
        /// Asset ID or serial number
        asset: String,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let token = cli.token.as_deref();

    match cli.command {
        Some(Command::Init { force }) => commands::init(cli.config.as_deref(), force, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("firewatch v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        Some(command) => {
            let config = Config::load(cli.config.as_deref())?;
            match command {
                Command::Serve { bind, port } => commands::serve(&config, bind, port),
                Command::Asset { action } => commands::asset(&config, token, action, output_mode),
                Command::Status { asset } => commands::status(&config, token, &asset, output_mode),
                Command::Inspect {
                    asset,
                    inspection_type,
                    observation,
                    remarks,
                    due_for_refilling,
                } => commands::inspect(
                    &config,
                    token,
                    commands::InspectArgs {
                        asset,
                        inspection_type,
                        observation,
                        remarks,
                        due_for_refilling,
                    },
                    output_mode,
                ),
                Command::History { asset } => commands::history(&config, &asset, output_mode),
                Command::Stats => commands::stats(&config, output_mode),
                Command::Summary => commands::summary(&config, output_mode),
                Command::Audit { limit } => commands::audit(&config, token, limit, output_mode),
                Command::Init { .. } | Command::Version => Ok(()),
            }
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("firewatch v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'firewatch --help' for usage");
                println!("Run 'firewatch init' to get started");
            }
            Ok(())
        },
    }
}
