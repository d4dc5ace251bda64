//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skillog")]
#[command(about = "Log practice sessions with undo/redo history", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new log
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Category used when `add` is given none
        #[arg(long, default_value = "other")]
        default_category: String,
    },

    /// Log a practice session for today
    Add {
        /// What was practiced (e.g., Rust, Spanish)
        #[arg(short, long)]
        skill: String,

        /// Hours spent (> 0)
        #[arg(long, allow_negative_numbers = true)]
        hours: f64,

        /// programming, design, languages, personal or other
        #[arg(short, long)]
        category: Option<String>,

        /// Short description of what you did
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove an entry by id
    Remove {
        id: String,
    },

    /// Undo the last change
    Undo,

    /// Redo the last undone change
    Redo,

    /// Show a day's entries grouped by category
    Today {
        /// Day to show as a UTC calendar day (today, yesterday, monday, YYYY-MM-DD)
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Show entry ids
        #[arg(long)]
        ids: bool,
    },

    /// List every entry in stored order
    List,

    /// Summarize a day's practice
    Summary {
        /// Day to summarize as a UTC calendar day (today, yesterday, monday, YYYY-MM-DD)
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Get or set the display theme (dark, light)
    Theme {
        value: Option<String>,
    },

    /// Delete all entries and history
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
