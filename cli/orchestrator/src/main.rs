//! Tessera CLI
//!
//! Entry point for running the wrapper pass over a service description
//! stored as JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::Config;

/// Command-line interface configuration for tessera.
#[derive(Parser, Debug)]
#[command(
    name = "tessera",
    about = "Synthesize polling handles and page iterators for a service description",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Available tessera commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Wrap long-running and paginated methods and write the augmented model
    Rewrite {
        /// Parsed service description (defaults to `codegen.input_path`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Where to write the result (defaults to `codegen.output_path`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check a model for dangling references and name collisions
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Write the default configuration file
    InitConfig {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Commands::InitConfig { path } = &cli.cmd {
        match tessera_cli::init_config(path.as_deref()) {
            Ok(written) => println!("Wrote default configuration to {}", written.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = logging::init(&config.logging.level, config.logging.file.as_deref()) {
        eprintln!("Error: Failed to open log file: {}", e);
        std::process::exit(1);
    }

    match cli.cmd {
        Commands::Rewrite { input, output } => {
            match tessera_cli::rewrite(input.as_deref(), output.as_deref(), &config) {
                Ok(report) => println!(
                    "Rewrote {} of {} methods ({} paged, {} long-running, {} both); {} types added",
                    report.rewritten(),
                    report.methods,
                    report.paged,
                    report.long_running,
                    report.paged_long_running,
                    report.types_added
                ),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { input } => match tessera_cli::validate(&input) {
            Ok(diagnostics) => {
                println!("{} is valid ({} warnings)", input.display(), diagnostics.warnings.len())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::InitConfig { .. } => {}
    }
}
