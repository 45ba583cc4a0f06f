//! Mundus CLI - decline Latin nouns and play the text adventure.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Mundus - a Latin-language text adventure
#[derive(Parser, Debug)]
#[command(name = "mundus")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print all twelve forms of a noun
    Decline {
        /// Nominative singular
        nominative: String,

        /// Genitive singular
        genitive: String,

        /// Gender: māre, muliebre or neutrum
        gender: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play interactively (or from a script)
    Play {
        /// Start from a world snapshot
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// World configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,

        /// Save the world to this file on exit
        #[arg(long)]
        save: Option<PathBuf>,

        /// Simulated seconds passing after every command
        #[arg(long)]
        wander_every: Option<u64>,
    },

    /// Check a world snapshot against the invariants
    Check {
        /// Snapshot file (.json)
        #[arg(required = true)]
        snapshot: PathBuf,
    },

    /// List the built-in object prototypes
    Prototypes {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Decline {
            nominative,
            genitive,
            gender,
            format,
        } => cli::decline::execute(&nominative, &genitive, &gender, format),

        Commands::Play {
            world,
            config,
            seed,
            script,
            save,
            wander_every,
        } => cli::play::execute(cli::play::PlayOptions {
            world,
            config,
            seed,
            script,
            save,
            wander_every,
        }),

        Commands::Check { snapshot } => cli::check::execute(&snapshot),

        Commands::Prototypes { format } => cli::prototypes::execute(format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
