//! basedrum CLI - generate, validate, expand, inspect, and play song documents
//!
//! This binary turns onchain identity snapshots into deterministic drum-machine
//! documents and drives them through the step sequencer.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use basedrum_cli::commands;

/// basedrum - Identity-Driven Generative Drum Machine
#[derive(Parser)]
#[command(name = "basedrum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a seed song document from a user-data snapshot
    Generate {
        /// Path to a user-data JSON snapshot (defaults apply when omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output path for the song document (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Use the rule-based onboarding tier instead of the full generator
        #[arg(long)]
        simple: bool,

        /// Seed override for the stochastic tier
        #[arg(long)]
        seed: Option<u32>,

        /// Output machine-readable JSON diagnostics
        #[arg(long)]
        json: bool,
    },

    /// Validate a song document file
    Validate {
        /// Path to the song document
        path: String,

        /// Output machine-readable JSON diagnostics
        #[arg(long)]
        json: bool,
    },

    /// Apply a producer-pass response to a seed document
    Expand {
        /// Path to the seed song document
        path: String,

        /// Path to the producer response JSON
        #[arg(short, long)]
        response: String,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show a document's metadata, canonical hash, and track table
    Inspect {
        /// Path to the song document
        path: String,
    },

    /// Play a document through console voices
    Play {
        /// Path to the song document
        path: String,

        /// Number of bars to play before stopping
        #[arg(long, default_value_t = 4)]
        bars: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            simple,
            seed,
            json,
        } => commands::generate::run(input.as_deref(), output.as_deref(), simple, seed, json),
        Commands::Validate { path, json } => commands::validate::run(&path, json),
        Commands::Expand {
            path,
            response,
            output,
        } => commands::expand::run(&path, &response, output.as_deref()),
        Commands::Inspect { path } => commands::inspect::run(&path),
        Commands::Play { path, bars } => commands::play::run(&path, bars),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
