use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "wealthjournal")]
#[command(about = "Investment growth journal: dashboard, feed and AI-assisted entries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json)
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the portfolio overview
    Dashboard,

    /// List journal entries, newest first
    Feed {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Analyze notes and screenshots into a new journal entry
    Submit {
        /// Free-form notes about this month's portfolio
        #[arg(short, long)]
        text: Option<String>,

        /// Portfolio screenshot (repeatable; the first is the primary image)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },

    /// Delete a journal entry
    Delete {
        /// Entry id as shown in the feed
        id: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
