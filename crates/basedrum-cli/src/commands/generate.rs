//! Generate command implementation.
//!
//! Turns a user-data snapshot into a validated seed song document, via either
//! the stochastic generator or the rule-based onboarding tier.

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use basedrum_engine::generator::{GeneratedTrack, PatternGenerator};
use basedrum_engine::threshold::ThresholdGenerator;
use basedrum_spec::hash::canonical_document_hash;
use basedrum_spec::song::SongDocument;
use basedrum_spec::validation::validate_document;

use crate::input::{load_user_data, write_output};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateOutput<'a> {
    ok: bool,
    tempo: u16,
    key: String,
    hash: String,
    tracks: Vec<&'a GeneratedTrack>,
    document: &'a SongDocument,
}

/// Run the generate command.
///
/// # Arguments
/// * `input` - Optional path to a user-data JSON snapshot
/// * `output` - Optional output path for the document (stdout otherwise)
/// * `simple` - Use the rule-based onboarding tier instead of the generator
/// * `seed` - Optional seed override for the stochastic tier
/// * `json` - Emit machine-readable JSON diagnostics
pub fn run(
    input: Option<&str>,
    output: Option<&str>,
    simple: bool,
    seed: Option<u32>,
    json: bool,
) -> Result<ExitCode> {
    let user = input.map(load_user_data).transpose()?;
    let constraints = basedrum_engine::extract_constraints(user.as_ref());
    let created = chrono::Utc::now().to_rfc3339();

    let (doc, tracks) = if simple {
        let user = user.unwrap_or_default();
        (ThresholdGenerator::document(&user, &created), Vec::new())
    } else {
        let mut generator = match seed {
            Some(seed) => PatternGenerator::with_seed(user, seed),
            None => PatternGenerator::new(user),
        };
        let tracks = generator.generate();
        let doc = generator.document_for(&tracks, &created);
        (doc, tracks)
    };

    // Generator output must always validate against its own contract.
    let result = validate_document(&doc);
    if !result.is_ok() {
        bail!(
            "generated document failed validation: {}",
            result.errors[0]
        );
    }

    let hash = canonical_document_hash(&doc)?;
    let doc_json = doc.to_json()?;

    if json {
        let report = GenerateOutput {
            ok: true,
            tempo: doc.metadata.bpm,
            key: constraints.key_name(),
            hash,
            tracks: tracks.iter().collect(),
            document: &doc,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        write_output(output, &doc_json)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} in {} at {} BPM, {} tracks",
        "Generated:".cyan().bold(),
        doc.metadata.title,
        constraints.key_name(),
        doc.metadata.bpm,
        doc.tracks.len()
    );
    for track in &tracks {
        println!(
            "  {} {} [{} steps] {}",
            "·".dimmed(),
            track.name.bold(),
            track.pattern.len(),
            track.reason.dimmed()
        );
    }
    println!("{} {}", "Hash:".cyan().bold(), hash);

    write_output(output, &doc_json)?;
    if let Some(path) = output {
        println!("{} {}", "Wrote:".green().bold(), path);
    }
    Ok(ExitCode::SUCCESS)
}
