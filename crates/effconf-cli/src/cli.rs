//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use effconf_core::LaunchMode;

/// effconf - Show the effective configuration of a Quarkus project
#[derive(Parser, Debug)]
#[command(name = "effconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (defaults to the nearest directory with a Gradle build file)
    #[arg(short = 'C', long, global = true, env = "EFFCONF_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Resource directory, relative to the project (repeatable)
    #[arg(short = 'r', long = "resource-dir", global = true)]
    pub resource_dirs: Vec<PathBuf>,

    /// System property (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    pub system: Vec<(String, String)>,

    /// Project property (repeatable)
    #[arg(short = 'P', value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    pub project: Vec<(String, String)>,

    /// Build property (repeatable)
    #[arg(short = 'B', value_name = "KEY=VALUE", value_parser = parse_key_value, global = true)]
    pub build: Vec<(String, String)>,

    /// Use this profile instead of resolving one
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Launch mode, which decides the fallback profile
    #[arg(long, value_enum, default_value_t = Mode::Normal, global = true)]
    pub mode: Mode,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Launch mode as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Dev,
    Test,
}

impl From<Mode> for LaunchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => LaunchMode::Normal,
            Mode::Dev => LaunchMode::Development,
            Mode::Test => LaunchMode::Test,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the effective configuration
    ///
    /// Examples:
    ///   effconf show                       # All properties
    ///   effconf show --prefix quarkus.     # Build-relevant properties only
    ///   effconf show --origins             # With the winning source per key
    ///   effconf show --save effective.properties
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Show which source supplied each value
        #[arg(long)]
        origins: bool,

        /// Only keys starting with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Expand ${...} references
        #[arg(long)]
        expand: bool,

        /// Write the result to a .properties file instead of printing it
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Print the active profile
    Profile {
        /// Output as JSON, including where the profile came from
        #[arg(long)]
        json: bool,
    },

    /// Print the effective value of one property
    Get {
        /// Property key
        key: String,

        /// Expand ${...} references
        #[arg(long)]
        expand: bool,
    },

    /// List the property sources taking part in the merge
    Sources {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{arg}`")),
    }
}
