//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Birthday reminder
#[derive(Debug, Parser)]
#[command(name = "birthday-reminder")]
#[command(author, version, about = "Mails today's birthdays from a vCard directory", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "BIRTHDAY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level; overrides the configured log filter and RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Notify today's birthdays and export the calendar if enabled (default)
    Run,

    /// List today's birthdays without sending anything
    Today,

    /// Write the birthday calendar without sending notifications
    ///
    /// Example: birthday-reminder export --output ./public/birthdays.ics
    Export {
        /// Target file (default: calendar_export.output_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and validate the configuration
    CheckConfig,
}

impl Cli {
    /// The requested command; `run` when none is given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }

    /// Log filter forced by `-v`, if any
    pub const fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            v => Some(log_filter_from_verbosity(v)),
        }
    }
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
