//! effconf CLI
//!
//! Shows the effective configuration a Quarkus build would see for a project.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ShowOptions;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command.clone() else {
        println!(
            "{} Effective configuration for Quarkus projects",
            "effconf".green().bold()
        );
        println!();
        println!("Run {} for available commands.", "effconf --help".cyan());
        return Ok(());
    };

    match command {
        Commands::Show {
            json,
            origins,
            prefix,
            expand,
            save,
        } => commands::run_show(
            &context::resolver(&cli)?,
            &ShowOptions {
                json,
                origins,
                prefix,
                expand,
                save,
            },
        ),
        Commands::Profile { json } => commands::run_profile(&context::resolver(&cli)?, json),
        Commands::Get { key, expand } => commands::run_get(&context::resolver(&cli)?, &key, expand),
        Commands::Sources { json } => commands::run_sources(&context::resolver(&cli)?, json),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
