//! Validate command implementation.
//!
//! Validates a song document file and reports coded errors and warnings.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use basedrum_spec::error::{ValidationError, ValidationWarning};
use basedrum_spec::song::SongDocument;
use basedrum_spec::validation::validate_document;

#[derive(Serialize)]
struct JsonDiagnostic {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[derive(Serialize)]
struct ValidateOutput {
    ok: bool,
    errors: Vec<JsonDiagnostic>,
    warnings: Vec<JsonDiagnostic>,
}

fn error_to_json(error: &ValidationError) -> JsonDiagnostic {
    JsonDiagnostic {
        code: error.code.code().to_string(),
        message: error.message.clone(),
        path: error.path.clone(),
    }
}

fn warning_to_json(warning: &ValidationWarning) -> JsonDiagnostic {
    JsonDiagnostic {
        code: warning.code.code().to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Run the validate command.
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid.
pub fn run(path: &str, json_output: bool) -> Result<ExitCode> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("could not read {}", path))?;

    let doc: SongDocument = match serde_json::from_str(&contents) {
        Ok(doc) => doc,
        Err(err) => {
            if json_output {
                let output = ValidateOutput {
                    ok: false,
                    errors: vec![JsonDiagnostic {
                        code: "PARSE".to_string(),
                        message: err.to_string(),
                        path: None,
                    }],
                    warnings: Vec::new(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{} {}", "Invalid JSON:".red().bold(), err);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let result = validate_document(&doc);

    if json_output {
        let output = ValidateOutput {
            ok: result.is_ok(),
            errors: result.errors.iter().map(error_to_json).collect(),
            warnings: result.warnings.iter().map(warning_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!("{} {}", "Validating:".cyan().bold(), path);
    for warning in &result.warnings {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }
    if result.is_ok() {
        println!(
            "{} {} tracks, {} bars, {} steps",
            "Valid:".green().bold(),
            doc.tracks.len(),
            doc.metadata.bars,
            doc.metadata.steps
        );
        Ok(ExitCode::SUCCESS)
    } else {
        for error in &result.errors {
            println!("  {} {}", "error:".red().bold(), error);
        }
        println!(
            "{} {} error(s)",
            "Invalid:".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::FAILURE)
    }
}
