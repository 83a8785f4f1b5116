//! The rule-based onboarding generator.
//!
//! A faster, fully non-stochastic alternative to the pattern generator: each
//! instrument maps one raw scalar straight into a canonical pattern through a
//! small ordered set of inclusive bands. Bands are value-level supersets as
//! the scalar grows, so a busier identity always keeps every hit of a quieter
//! one and only gains new ones. The melody is spelled directly from the
//! wallet address, one hex nibble per step.

use basedrum_spec::song::{SongDocument, SongEffects, SongMetadata, SongTrack};
use basedrum_spec::user::UserData;

use crate::constraints::extract_constraints;

// Band tables. Each row is (inclusive upper bound, pattern); rows are ordered
// and every row's pattern is a superset of the previous row's.
const KICK_BANDS: [(u64, &[u32]); 4] = [
    (0, &[0, 4, 8, 12]),
    (25, &[0, 4, 8, 12, 14]),
    (100, &[0, 2, 4, 6, 8, 10, 12, 14]),
    (u64::MAX, &[0, 2, 4, 6, 7, 8, 10, 12, 14, 15]),
];

const SNARE_BANDS: [(u64, &[u32]); 4] = [
    (0, &[4, 12]),
    (50, &[4, 12, 15]),
    (500, &[4, 7, 12, 15]),
    (u64::MAX, &[4, 7, 12, 13, 15]),
];

const BASS_BANDS: [(u64, &[u32]); 4] = [
    (0, &[0, 8]),
    (5, &[0, 8, 14]),
    (20, &[0, 6, 8, 14]),
    (u64::MAX, &[0, 3, 6, 8, 11, 14]),
];

/// Hex nibble to melody note; `None` is a rest. A pentatonic lattice so any
/// address spells something consonant.
const NIBBLE_NOTES: [Option<&str>; 16] = [
    Some("C4"),
    Some("D4"),
    Some("E4"),
    Some("G4"),
    Some("A4"),
    None,
    Some("C5"),
    Some("D5"),
    None,
    Some("E5"),
    Some("G5"),
    None,
    Some("A5"),
    Some("C4"),
    None,
    Some("E4"),
];

fn band_lookup(bands: &[(u64, &'static [u32])], value: u64) -> Vec<u32> {
    for &(ceiling, pattern) in bands {
        if value <= ceiling {
            return pattern.to_vec();
        }
    }
    bands[bands.len() - 1].1.to_vec()
}

/// Kick steps for a transaction count.
pub fn kick_steps(transaction_count: u64) -> Vec<u32> {
    band_lookup(&KICK_BANDS, transaction_count)
}

/// Snare steps for a follower count.
pub fn snare_steps(follower_count: u64) -> Vec<u32> {
    band_lookup(&SNARE_BANDS, follower_count)
}

/// Bass steps for a token count.
pub fn bass_steps(token_count: u64) -> Vec<u32> {
    band_lookup(&BASS_BANDS, token_count)
}

/// Spells a 16-step melody from the wallet address.
///
/// The first 16 hex digits after the `0x` prefix each map through
/// [`NIBBLE_NOTES`]; rests and non-hex characters produce silent steps. The
/// same address always yields the same melody.
pub fn address_melody(address: &str) -> (Vec<u32>, Vec<String>) {
    let digits = address.trim_start_matches("0x").chars().take(16);
    let mut pattern = Vec::new();
    let mut notes = Vec::new();
    for (step, ch) in digits.enumerate() {
        let Some(nibble) = ch.to_digit(16) else {
            continue;
        };
        if let Some(note) = NIBBLE_NOTES[nibble as usize] {
            pattern.push(step as u32);
            notes.push(note.to_string());
        }
    }
    (pattern, notes)
}

/// The rule-based generator facade.
pub struct ThresholdGenerator;

impl ThresholdGenerator {
    /// Builds the onboarding document for a snapshot.
    pub fn document(user: &UserData, created: &str) -> SongDocument {
        let constraints = extract_constraints(Some(user));
        let metadata = SongMetadata::new("First Beat", constraints.tempo, 1, created);
        let mut doc = SongDocument::new(metadata, SongEffects::default());

        doc.insert_track("kick", SongTrack::hits(kick_steps(user.transaction_count()), -4.0));
        doc.insert_track("snare", SongTrack::hits(snare_steps(user.follower_count()), -8.0));
        doc.insert_track("bass", SongTrack::hits(bass_steps(user.token_count()), -9.0));

        let (pattern, notes) = address_melody(&user.wallet.address);
        doc.insert_track("melody", SongTrack::melodic(pattern, notes, -10.0));

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basedrum_spec::validation::validate_document;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn as_set(steps: &[u32]) -> BTreeSet<u32> {
        steps.iter().copied().collect()
    }

    #[test]
    fn zero_activity_is_four_on_floor_and_backbeat() {
        assert_eq!(kick_steps(0), vec![0, 4, 8, 12]);
        assert_eq!(snare_steps(0), vec![4, 12]);
    }

    #[test]
    fn kick_bands_grow_by_value_level_superset() {
        let quiet = as_set(&kick_steps(0));
        let mid = as_set(&kick_steps(30));
        let busy = as_set(&kick_steps(150));
        assert!(quiet.is_subset(&mid));
        assert!(mid.is_subset(&busy));
        assert!(quiet.len() < mid.len());
        assert!(mid.len() < busy.len());
    }

    #[test]
    fn every_band_table_is_monotonic() {
        for table in [&KICK_BANDS, &SNARE_BANDS, &BASS_BANDS] {
            for window in table.windows(2) {
                let (_, smaller) = window[0];
                let (_, larger) = window[1];
                assert!(
                    as_set(smaller).is_subset(&as_set(larger)),
                    "{:?} not a subset of {:?}",
                    smaller,
                    larger
                );
            }
        }
    }

    #[test]
    fn melody_is_stable_per_address() {
        let address = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let (pattern_a, notes_a) = address_melody(address);
        let (pattern_b, notes_b) = address_melody(address);
        assert_eq!(pattern_a, pattern_b);
        assert_eq!(notes_a, notes_b);
        // Nibble 0xA maps to G5 on all sixteen steps.
        assert_eq!(pattern_a, (0..16).collect::<Vec<u32>>());
        assert!(notes_a.iter().all(|n| n == "G5"));
    }

    #[test]
    fn rest_nibbles_leave_gaps() {
        // 0x5 and 0x8 are rests in the nibble table.
        let (pattern, notes) = address_melody("0x5858585858585858");
        assert!(pattern.is_empty());
        assert!(notes.is_empty());
    }

    #[test]
    fn onboarding_document_validates() {
        let mut user = UserData::default();
        user.wallet.address = "0x1234567890abcdef1234567890abcdef12345678".to_string();
        user.onchain.transaction_count = 30;
        user.farcaster.follower_count = 10;
        user.onchain.token_count = 3;

        let doc = ThresholdGenerator::document(&user, "2024-06-01T00:00:00Z");
        let result = validate_document(&doc);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert_eq!(doc.tracks.len(), 4);
    }

    #[test]
    fn onboarding_document_is_deterministic() {
        let mut user = UserData::default();
        user.wallet.address = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_string();
        let a = ThresholdGenerator::document(&user, "2024-06-01T00:00:00Z");
        let b = ThresholdGenerator::document(&user, "2024-06-01T00:00:00Z");
        assert_eq!(a, b);
        assert_eq!(a.track("kick").unwrap().pattern, vec![0, 4, 8, 12]);
        assert_eq!(a.track("snare").unwrap().pattern, vec![4, 12]);
    }
}
