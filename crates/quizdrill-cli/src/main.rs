//! quizdrill CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdrill", version, about = "Interactive quiz runner for delimited question banks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive quiz session
    Run {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// How many questions to ask (defaults to the configured size)
        #[arg(long)]
        size: Option<usize>,

        /// Shuffle option order per question
        #[arg(long)]
        shuffle: bool,

        /// Seed for reproducible selection and shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Source id to load instead of the configured list (repeatable)
        #[arg(long = "source")]
        sources: Vec<String>,

        /// Output directory for session reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: none, json, markdown, all
        #[arg(long, default_value = "none")]
        format: String,
    },

    /// Validate bank files without running a quiz
    Validate {
        /// Path to a bank file or directory of .csv files
        #[arg(long)]
        bank: PathBuf,
    },

    /// Show the configured sources and their status
    Sources {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Merge bank files, dropping duplicate question ids
    Dedup {
        /// Bank files to merge; on duplicate ids the earliest file wins
        files: Vec<PathBuf>,

        /// Output file
        #[arg(long, default_value = "questions_dedup.csv")]
        output: PathBuf,
    },

    /// Create a starter config and example bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            size,
            shuffle,
            seed,
            sources,
            output,
            format,
        } => commands::run::execute(config, size, shuffle, seed, sources, output, format).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Sources { config } => commands::sources::execute(config).await,
        Commands::Dedup { files, output } => commands::dedup::execute(files, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
