//! Expand command implementation.
//!
//! Applies a producer-pass response to a seed document. A rejected response
//! is a recoverable condition: the seed document is kept and written out
//! unchanged, with an explanation.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use basedrum_engine::expand::accept_expansion;

use crate::input::{load_document, write_output};

/// Run the expand command.
///
/// # Arguments
/// * `song_path` - Path to the seed song document
/// * `response_path` - Path to the producer response JSON
/// * `output` - Optional output path (stdout otherwise)
pub fn run(song_path: &str, response_path: &str, output: Option<&str>) -> Result<ExitCode> {
    let original = load_document(song_path)?;
    let response = std::fs::read_to_string(response_path)
        .map_err(|err| anyhow::anyhow!("could not read producer response {}: {}", response_path, err))?;

    match accept_expansion(&original, &response) {
        Ok(expanded) => {
            println!(
                "{} {} bars / {} steps",
                "Expanded:".green().bold(),
                expanded.metadata.bars,
                expanded.metadata.steps
            );
            write_output(output, &expanded.to_json()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("{} {}", "Expansion rejected:".yellow().bold(), err);
            println!("{}", "Keeping the original document.".yellow());
            write_output(output, &original.to_json()?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
