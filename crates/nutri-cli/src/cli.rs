//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chatbot-style nutrition logger.
///
/// Parses free-form Korean or English meal descriptions into quantified food
/// items with computed calories and macros, and records them to Google Sheets
/// and Google Calendar.
#[derive(Debug, Parser)]
#[command(name = "nutri", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a meal description and print the result.
    Parse {
        /// The meal description, e.g. "아침에 토스트 2장이랑 계란후라이 1개".
        input: String,

        /// Print the parsed meal as pretty JSON.
        #[arg(long)]
        json: bool,
    },

    /// Parse a meal description and record it to Google Sheets and Calendar.
    Log {
        /// The meal description.
        input: String,

        /// Print the would-be rows and event without calling Google.
        #[arg(long)]
        dry_run: bool,
    },
}
