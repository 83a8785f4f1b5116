//! Acceptance contract for the remote producer pass.
//!
//! The producer service takes a one-bar seed document and returns a full
//! arrangement. The service is outside the core; everything it returns is
//! treated as untrusted input and re-validated here. Rejection is always
//! recoverable: the caller keeps playing the unexpanded document.

use thiserror::Error;

use basedrum_spec::error::DocumentError;
use basedrum_spec::song::SongDocument;
use basedrum_spec::validation::parse_document;

/// Bar count an accepted expansion must have.
pub const EXPANDED_BARS: u16 = 32;
/// Step count an accepted expansion must have.
pub const EXPANDED_STEPS: u32 = 512;

/// Reasons a producer response is rejected.
#[derive(Debug, Error)]
pub enum ExpansionError {
    /// Response was not parseable/valid as a song document.
    #[error("producer response is not a valid document: {0}")]
    Document(#[from] DocumentError),

    /// Response has the wrong arrangement length.
    #[error("expanded document must span {EXPANDED_BARS} bars, got {0}")]
    WrongBars(u16),

    /// Response dropped a track from the seed document.
    #[error("expanded document is missing track \"{0}\"")]
    MissingTrack(String),

    /// Response invented a track the seed document does not have.
    #[error("expanded document has unexpected track \"{0}\"")]
    UnexpectedTrack(String),
}

/// Validates a producer response against the seed document it expands.
///
/// On success returns the parsed expansion, ready to publish to the
/// sequencer. On any failure the caller should surface the message and keep
/// the original document.
pub fn accept_expansion(
    original: &SongDocument,
    response_json: &str,
) -> Result<SongDocument, ExpansionError> {
    let expanded = parse_document(response_json)?;

    if expanded.metadata.bars != EXPANDED_BARS || expanded.metadata.steps != EXPANDED_STEPS {
        return Err(ExpansionError::WrongBars(expanded.metadata.bars));
    }

    for name in original.tracks.keys() {
        if !expanded.tracks.contains_key(name) {
            return Err(ExpansionError::MissingTrack(name.clone()));
        }
    }
    for name in expanded.tracks.keys() {
        if !original.tracks.contains_key(name) {
            return Err(ExpansionError::UnexpectedTrack(name.clone()));
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use basedrum_spec::song::{SongEffects, SongMetadata, SongTrack};

    fn seed_doc() -> SongDocument {
        let metadata = SongMetadata::new("Seed", 140, 1, "2024-06-01T00:00:00Z");
        let mut doc = SongDocument::new(metadata, SongEffects::default());
        doc.insert_track("kick", SongTrack::hits(vec![0, 4, 8, 12], -4.0));
        doc.insert_track("snare", SongTrack::hits(vec![4, 12], -8.0));
        doc
    }

    fn expanded_doc() -> SongDocument {
        let metadata =
            SongMetadata::new("Seed (Extended)", 140, EXPANDED_BARS, "2024-06-01T00:00:00Z");
        let mut doc = SongDocument::new(metadata, SongEffects::default());
        let kicks: Vec<u32> = (0..EXPANDED_STEPS).step_by(4).collect();
        doc.insert_track("kick", SongTrack::hits(kicks, -4.0));
        let snares: Vec<u32> = (4..EXPANDED_STEPS).step_by(8).collect();
        doc.insert_track("snare", SongTrack::hits(snares, -8.0));
        doc
    }

    #[test]
    fn valid_expansion_is_accepted() {
        let response = expanded_doc().to_json().unwrap();
        let accepted = accept_expansion(&seed_doc(), &response).unwrap();
        assert_eq!(accepted.metadata.bars, 32);
        assert_eq!(accepted.metadata.steps, 512);
    }

    #[test]
    fn non_json_response_is_rejected() {
        let err = accept_expansion(&seed_doc(), "here is your beat!").unwrap_err();
        assert!(matches!(err, ExpansionError::Document(_)));
    }

    #[test]
    fn schema_invalid_response_is_rejected() {
        let mut bad = expanded_doc();
        bad.metadata.bpm = 999;
        let err = accept_expansion(&seed_doc(), &bad.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, ExpansionError::Document(_)));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let response = seed_doc().to_json().unwrap();
        let err = accept_expansion(&seed_doc(), &response).unwrap_err();
        assert!(matches!(err, ExpansionError::WrongBars(1)));
    }

    #[test]
    fn changed_track_set_is_rejected() {
        let mut dropped = expanded_doc();
        dropped.tracks.remove("snare");
        let err = accept_expansion(&seed_doc(), &dropped.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, ExpansionError::MissingTrack(name) if name == "snare"));

        let mut extra = expanded_doc();
        extra.insert_track("cowbell", SongTrack::hits(vec![2], -6.0));
        let err = accept_expansion(&seed_doc(), &extra.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, ExpansionError::UnexpectedTrack(name) if name == "cowbell"));
    }
}
