//! Command-line host for the Nightline story-to-state core.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Parsed command line.
#[derive(Parser)]
#[command(
    name = "nightline",
    about = "Nightline - keeps game state in step with a generated story",
    long_about = None,
    version,
    propagate_version = true
)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands, one per module under `commands`.
#[derive(Subcommand)]
enum Commands {
    /// Feed a transcript through the sync core, one passage per paragraph
    Play {
        /// Transcript file; passages are separated by blank lines
        transcript: PathBuf,

        /// Write the save blob here when done
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Continue from the save file instead of starting a new game
        #[arg(short, long, requires = "save")]
        resume: bool,

        /// RNG seed for trigger rolls
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of inventory slots
        #[arg(long, default_value_t = 20)]
        slots: usize,
    },

    /// Show character, location and inventory from a save file
    Status {
        /// Save file
        save: PathBuf,
    },

    /// Print the story so far from a save file
    Recap {
        /// Save file
        save: PathBuf,
    },

    /// Print the signals found in a passage as JSON
    Extract {
        /// Narrative text
        text: String,
    },
}

/// Install the log subscriber, run the subcommand, and exit non-zero on error.
fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nl_sync=info,nl_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            transcript,
            save,
            resume,
            seed,
            slots,
        } => commands::play::run(&transcript, save.as_deref(), resume, seed, slots),
        Commands::Status { save } => commands::status::run(&save),
        Commands::Recap { save } => commands::recap::run(&save),
        Commands::Extract { text } => commands::extract::run(&text),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
