//! `flashcards` — spaced repetition review from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "flashcards", version, about = "Spaced repetition flashcards")]
pub struct Cli {
    /// Config file path (defaults to ./flashcards.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overrides the config
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Owner whose cards are used, overrides the config
    #[arg(long, global = true)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a single card
    Add {
        #[arg(long)]
        front: String,

        #[arg(long)]
        back: String,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long)]
        subtopic: Option<String>,
    },

    /// List every card with its schedule
    List,

    /// Show cards due for review
    Due {
        /// Maximum number of cards (defaults to the configured due_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Grade a card from 0 (blackout) to 5 (perfect recall)
    Review {
        card_id: String,

        #[arg(allow_negative_numbers = true)]
        quality: i64,
    },

    /// Show the interval each grade would give a card
    Preview { card_id: String },

    /// Show collection statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add cards from a JSON array of {front, back, topic, subtopic}
    Import { file: PathBuf },

    /// Write the owner's cards to a JSON file
    Export { file: PathBuf },

    /// Move the simulated date forward by one day
    AdvanceDay,

    /// List owners with stored cards
    Owners,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tutor_flashcards=info,flashcards=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
