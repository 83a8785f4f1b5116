//! Inspect command implementation.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use basedrum_seq::effects::EffectKind;
use basedrum_spec::hash::canonical_document_hash;

use crate::input::load_document;

/// Run the inspect command: metadata, canonical hash, and the track table.
pub fn run(path: &str) -> Result<ExitCode> {
    let doc = load_document(path)?;

    println!("{} {}", "Title:".cyan().bold(), doc.metadata.title);
    println!("{} {}", "Artist:".cyan().bold(), doc.metadata.artist);
    println!("{} {}", "Created:".cyan().bold(), doc.metadata.created);
    println!(
        "{} {} BPM, {} bars, {} steps",
        "Grid:".cyan().bold(),
        doc.metadata.bpm,
        doc.metadata.bars,
        doc.metadata.steps
    );
    println!(
        "{} {}",
        "Hash:".cyan().bold(),
        canonical_document_hash(&doc)?
    );

    let cutoff = doc.effects.filter.cutoff;
    println!(
        "{} cutoff {:.2} ({:.0} {}), reverb wet {:.2}, decay {:.1}s",
        "Effects:".cyan().bold(),
        cutoff,
        EffectKind::FilterCutoff.concrete(cutoff),
        EffectKind::FilterCutoff.unit(),
        doc.effects.reverb.wet,
        doc.effects.reverb.decay
    );

    println!("{}", "Tracks:".cyan().bold());
    for (name, track) in &doc.tracks {
        let kind = if track.notes.is_some() { "melodic" } else { "hits" };
        let muted = if track.muted { " [muted]" } else { "" };
        println!(
            "  {:<8} {:>3} steps  {:>6.1} dB  {}{}",
            name,
            track.pattern.len(),
            track.volume,
            kind,
            muted.red()
        );
    }

    if let Some(arrangement) = &doc.arrangement {
        println!("{}", "Arrangement:".cyan().bold());
        for (section, entry) in arrangement {
            println!(
                "  {:<10} bars {:>3}-{:<3}",
                section, entry.bars[0], entry.bars[1]
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
