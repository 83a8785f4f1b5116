//! Song document validation.
//!
//! Every document is validated here before it reaches the sequencer or is
//! persisted. Validation rejects whole documents: there is no partial
//! acceptance, and callers keep their previous known-good document when a
//! candidate fails.

use crate::error::{
    DocumentError, ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::song::{
    ActiveTracks, SongDocument, SongTrack, MAX_BARS, MAX_BPM, MAX_STEPS, MIN_BARS, MIN_BPM,
    MIN_STEPS, SILENCE_FLOOR_DB, SONG_FORMAT, STEPS_PER_BAR,
};

/// Validates a song document against its structural and range contract.
///
/// # Example
/// ```
/// use basedrum_spec::song::{SongDocument, SongEffects, SongMetadata, SongTrack};
/// use basedrum_spec::validation::validate_document;
///
/// let metadata = SongMetadata::new("Demo", 128, 1, "2024-06-01T00:00:00Z");
/// let mut doc = SongDocument::new(metadata, SongEffects::default());
/// doc.insert_track("kick", SongTrack::hits(vec![0, 4, 8, 12], -6.0));
/// assert!(validate_document(&doc).is_ok());
/// ```
pub fn validate_document(doc: &SongDocument) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_metadata(doc, &mut result);
    validate_effects(doc, &mut result);
    for (name, track) in &doc.tracks {
        validate_track(name, track, doc.metadata.steps, &mut result);
    }
    validate_arrangement(doc, &mut result);

    result
}

/// Parses and validates a document in one step.
///
/// Returns the document only when it is fully valid; any parse or validation
/// failure rejects the candidate whole.
pub fn parse_document(json: &str) -> Result<SongDocument, DocumentError> {
    let doc: SongDocument = serde_json::from_str(json)?;
    let result = validate_document(&doc);
    if result.is_ok() {
        Ok(doc)
    } else {
        Err(DocumentError::Invalid(result))
    }
}

fn validate_metadata(doc: &SongDocument, result: &mut ValidationResult) {
    let meta = &doc.metadata;

    if meta.format != SONG_FORMAT {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedFormat,
            format!("format must be \"{}\", got \"{}\"", SONG_FORMAT, meta.format),
            "metadata.format",
        ));
    }

    if meta.bpm < MIN_BPM || meta.bpm > MAX_BPM {
        result.add_error(ValidationError::with_path(
            ErrorCode::BpmOutOfRange,
            format!("bpm must be {}-{}, got {}", MIN_BPM, MAX_BPM, meta.bpm),
            "metadata.bpm",
        ));
    }

    if meta.bars < MIN_BARS || meta.bars > MAX_BARS {
        result.add_error(ValidationError::with_path(
            ErrorCode::BarsOutOfRange,
            format!("bars must be {}-{}, got {}", MIN_BARS, MAX_BARS, meta.bars),
            "metadata.bars",
        ));
    }

    if meta.steps < MIN_STEPS || meta.steps > MAX_STEPS {
        result.add_error(ValidationError::with_path(
            ErrorCode::StepsOutOfRange,
            format!(
                "steps must be {}-{}, got {}",
                MIN_STEPS, MAX_STEPS, meta.steps
            ),
            "metadata.steps",
        ));
    }

    if meta.steps != meta.bars as u32 * STEPS_PER_BAR {
        result.add_error(ValidationError::with_path(
            ErrorCode::StepCountMismatch,
            format!(
                "steps must equal bars * {} ({} bars -> {}), got {}",
                STEPS_PER_BAR,
                meta.bars,
                meta.bars as u32 * STEPS_PER_BAR,
                meta.steps
            ),
            "metadata.steps",
        ));
    }

    if meta.title.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingTitle,
            "document has no title",
            "metadata.title",
        ));
    }
}

fn validate_effects(doc: &SongDocument, result: &mut ValidationResult) {
    let filter = &doc.effects.filter;
    check_range(result, filter.cutoff, 0.0, 1.0, "effects.filter.cutoff");
    check_range(
        result,
        filter.start_freq,
        20.0,
        20_000.0,
        "effects.filter.startFreq",
    );
    check_range(
        result,
        filter.end_freq,
        20.0,
        20_000.0,
        "effects.filter.endFreq",
    );

    let reverb = &doc.effects.reverb;
    check_range(result, reverb.wet, 0.0, 1.0, "effects.reverb.wet");
    check_range(result, reverb.room_size, 0.0, 1.0, "effects.reverb.roomSize");
    check_range(result, reverb.decay, 0.0, 10.0, "effects.reverb.decay");
}

fn check_range(result: &mut ValidationResult, value: f64, min: f64, max: f64, path: &str) {
    if !value.is_finite() || value < min || value > max {
        result.add_error(ValidationError::with_path(
            ErrorCode::EffectOutOfRange,
            format!("value must be within [{}, {}], got {}", min, max, value),
            path,
        ));
    }
}

fn validate_track(name: &str, track: &SongTrack, steps: u32, result: &mut ValidationResult) {
    let base = format!("tracks.{}", name);

    for (i, window) in track.pattern.windows(2).enumerate() {
        if window[1] <= window[0] {
            result.add_error(ValidationError::with_path(
                ErrorCode::PatternNotAscending,
                format!(
                    "pattern indices must be strictly ascending, got {} after {}",
                    window[1], window[0]
                ),
                format!("{}.pattern[{}]", base, i + 1),
            ));
        }
    }

    for (i, &step) in track.pattern.iter().enumerate() {
        if step >= steps {
            result.add_error(ValidationError::with_path(
                ErrorCode::StepIndexOutOfRange,
                format!("step index {} >= total steps {}", step, steps),
                format!("{}.pattern[{}]", base, i),
            ));
        }
    }

    if let Some(notes) = &track.notes {
        if notes.len() != track.pattern.len() {
            result.add_error(ValidationError::with_path(
                ErrorCode::ParallelArrayMismatch,
                format!(
                    "notes length {} does not match pattern length {}",
                    notes.len(),
                    track.pattern.len()
                ),
                format!("{}.notes", base),
            ));
        }
    }

    if let Some(velocity) = &track.velocity {
        if velocity.len() != track.pattern.len() {
            result.add_error(ValidationError::with_path(
                ErrorCode::ParallelArrayMismatch,
                format!(
                    "velocity length {} does not match pattern length {}",
                    velocity.len(),
                    track.pattern.len()
                ),
                format!("{}.velocity", base),
            ));
        }
        for (i, &v) in velocity.iter().enumerate() {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::VelocityOutOfRange,
                    format!("velocity must be within [0, 1], got {}", v),
                    format!("{}.velocity[{}]", base, i),
                ));
            }
        }
    }

    if let Some(ghosts) = &track.ghost_notes {
        for (i, &step) in ghosts.iter().enumerate() {
            if step >= steps {
                result.add_error(ValidationError::with_path(
                    ErrorCode::GhostNoteOutOfRange,
                    format!("ghost-note index {} >= total steps {}", step, steps),
                    format!("{}.ghostNotes[{}]", base, i),
                ));
            }
        }
    }

    if !track.volume.is_finite() {
        result.add_error(ValidationError::with_path(
            ErrorCode::VolumeNotFinite,
            format!("volume must be a finite dB value, got {}", track.volume),
            format!("{}.volume", base),
        ));
    } else if !track.muted && track.volume < SILENCE_FLOOR_DB {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::SilentTrack,
            format!(
                "volume {} dB is below the {} dB floor; track will not sound",
                track.volume, SILENCE_FLOOR_DB
            ),
            format!("{}.volume", base),
        ));
    }

    if track.pattern.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyPattern,
            "track has no steps",
            format!("{}.pattern", base),
        ));
    }
}

fn validate_arrangement(doc: &SongDocument, result: &mut ValidationResult) {
    let Some(arrangement) = &doc.arrangement else {
        return;
    };

    for (section, entry) in arrangement {
        let base = format!("arrangement.{}", section);
        let [start, end] = entry.bars;

        if start < 1 || end < start || end > doc.metadata.bars {
            result.add_error(ValidationError::with_path(
                ErrorCode::SectionBarsInvalid,
                format!(
                    "bar range [{}, {}] must lie within [1, {}]",
                    start, end, doc.metadata.bars
                ),
                format!("{}.bars", base),
            ));
        }

        match &entry.active_tracks {
            ActiveTracks::Literal(literal) if literal != "all" => {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidActiveTracks,
                    format!("active tracks literal must be \"all\", got \"{}\"", literal),
                    format!("{}.activeTracks", base),
                ));
            }
            ActiveTracks::Named(names) => {
                for name in names {
                    if !doc.tracks.contains_key(name) {
                        result.add_error(ValidationError::with_path(
                            ErrorCode::UnknownSectionTrack,
                            format!("section references unknown track \"{}\"", name),
                            format!("{}.activeTracks", base),
                        ));
                    }
                }
            }
            ActiveTracks::Literal(_) => {}
        }
    }
}
