//! classward CLI - validate class hierarchies described in JSON manifests

#![warn(missing_docs)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod config;
mod manifest;

use commands::{check, inspect};
use config::OutputFormat;

#[derive(Parser)]
#[command(name = "classward")]
#[command(about = "Class contract checker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, env = "CLASSWARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Define every class of a manifest and report each outcome
    Check {
        /// Path to the manifest
        manifest: PathBuf,

        /// Output format (overrides the configuration file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Stop at the first rejected class
        #[arg(long)]
        fail_fast: bool,
    },

    /// Show policy, resolution order and members of an accepted class
    Inspect {
        /// Path to the manifest
        manifest: PathBuf,

        /// Class name
        class: String,

        /// Output format (overrides the configuration file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = config::load_config(cli.config)?;

    match cli.command {
        Commands::Check {
            manifest,
            format,
            fail_fast,
        } => {
            let format = format.unwrap_or(config.output.format);
            let fail_fast = fail_fast || config.check.fail_fast;
            if !check::check(&manifest, format, fail_fast)? {
                std::process::exit(1);
            }
        }
        Commands::Inspect {
            manifest,
            class,
            format,
        } => {
            let format = format.unwrap_or(config.output.format);
            inspect::inspect(&manifest, &class, format)?;
        }
    }

    Ok(())
}
