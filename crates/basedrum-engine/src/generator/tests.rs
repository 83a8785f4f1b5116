//! Tests for the stochastic pattern generator.

use pretty_assertions::assert_eq;

use basedrum_spec::user::UserData;
use basedrum_spec::validation::validate_document;

use super::{apply_variation, variation_weights, PatternGenerator};
use crate::constraints::Mode;
use crate::library::{
    foundation_template, harmony_template, lead_template, rhythm_template, texture_template, Role,
};
use crate::rng::SeededRandom;

/// The reference identity from the product acceptance checklist.
fn reference_user() -> UserData {
    let mut user = UserData::default();
    user.wallet.address = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".to_string();
    user.wallet.balance = 2.5;
    user.onchain.transaction_count = 150;
    user.onchain.token_count = 12;
    user.onchain.nft_count = 3;
    user.farcaster.follower_count = 300;
    user.farcaster.following_count = 50;
    user.prices.eth = Some(3200.0);
    user
}

#[test]
fn generation_is_deterministic_per_identity() {
    let a = PatternGenerator::new(Some(reference_user())).generate();
    let b = PatternGenerator::new(Some(reference_user())).generate();
    assert_eq!(a, b);
}

#[test]
fn generation_is_deterministic_without_identity() {
    let a = PatternGenerator::new(None).generate();
    let b = PatternGenerator::new(None).generate();
    assert_eq!(a, b);
}

#[test]
fn different_identities_differ() {
    let mut other = reference_user();
    other.wallet.address = "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB".to_string();
    other.onchain.transaction_count = 900;

    let a = PatternGenerator::new(Some(reference_user())).generate();
    let b = PatternGenerator::new(Some(other)).generate();
    assert_ne!(a, b);
}

#[test]
fn downbeats_survive_variation_at_every_complexity() {
    let templates = [
        foundation_template(0.9),
        foundation_template(0.5),
        rhythm_template(0.8),
        harmony_template(0.9),
        texture_template(0.5),
        lead_template(0.9),
    ];
    for template in templates {
        for tenths in 0..=10 {
            let complexity = tenths as f64 / 10.0;
            for seed in 0..50u32 {
                let mut rng = SeededRandom::new(seed);
                let mut slots = template.steps.to_vec();
                apply_variation(&mut slots, complexity, &mut rng, false);
                for index in (0..slots.len()).step_by(4) {
                    assert_eq!(
                        slots[index], template.steps[index],
                        "downbeat {} changed in {} at complexity {}",
                        index, template.name, complexity
                    );
                }
            }
        }
    }
}

#[test]
fn variation_only_moves_off_downbeat_slots() {
    let template = foundation_template(0.9);
    let mut rng = SeededRandom::new(7);
    let mut slots = template.steps.to_vec();
    apply_variation(&mut slots, 1.0, &mut rng, false);
    for (index, (&before, &after)) in template.steps.iter().zip(&slots).enumerate() {
        if before != after {
            assert_ne!(index % 4, 0, "slot {} is structural", index);
        }
    }
}

#[test]
fn weight_bands_match_the_tuning_table() {
    assert_eq!(variation_weights(0.2), (0.10, 0.10));
    assert_eq!(variation_weights(0.4), (0.10, 0.10));
    assert_eq!(variation_weights(0.5), (0.20, 0.20));
    assert_eq!(variation_weights(0.7), (0.20, 0.20));
    assert_eq!(variation_weights(0.9), (0.30, 0.25));
}

#[test]
fn reference_identity_yields_four_tracks_with_reasons() {
    let mut generator = PatternGenerator::new(Some(reference_user()));
    assert_eq!(generator.constraints().mode, Mode::Major);
    assert!((144..=146).contains(&generator.constraints().tempo));

    let tracks = generator.generate();
    assert!(tracks.len() >= 4, "got {} tracks", tracks.len());

    let roles: Vec<Role> = tracks.iter().map(|t| t.role).collect();
    assert!(roles.contains(&Role::Foundation));
    assert!(roles.contains(&Role::Rhythm));
    assert!(roles.contains(&Role::Harmony));
    assert!(roles.contains(&Role::Texture));

    let reason_of = |role: Role| {
        tracks
            .iter()
            .find(|t| t.role == role)
            .map(|t| t.reason.as_str())
            .unwrap()
    };
    assert!(reason_of(Role::Foundation).contains("150"));
    assert!(reason_of(Role::Rhythm).contains("300"));
    assert!(reason_of(Role::Rhythm).contains("50"));
    assert!(reason_of(Role::Harmony).contains("2.5"));
    assert!(reason_of(Role::Texture).contains("12"));
    assert!(reason_of(Role::Texture).contains("3"));
    assert!(tracks.iter().all(|t| !t.reason.is_empty()));
}

#[test]
fn sparse_identity_gets_fewer_instruments() {
    // Default constraints: density 0.6, energy 0.7, complexity 0.5.
    // Texture needs complexity > 0.5 and lead needs density > 0.7.
    let tracks = PatternGenerator::new(None).generate();
    let roles: Vec<Role> = tracks.iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![Role::Foundation, Role::Rhythm, Role::Harmony]);
}

#[test]
fn melodic_tracks_carry_parallel_notes() {
    let tracks = PatternGenerator::new(Some(reference_user())).generate();
    for track in &tracks {
        match (&track.notes, track.role.is_melodic()) {
            (Some(notes), true) => assert_eq!(notes.len(), track.pattern.len()),
            (None, false) => {}
            other => panic!("role {} has mismatched notes: {:?}", track.role, other.0),
        }
    }
}

#[test]
fn patterns_are_ascending_and_in_range() {
    let tracks = PatternGenerator::new(Some(reference_user())).generate();
    for track in &tracks {
        assert!(track.pattern.windows(2).all(|w| w[0] < w[1]));
        assert!(track.pattern.iter().all(|&s| s < 16));
        for value in track.effects.values() {
            assert!((0.0..=1.0).contains(value));
        }
    }
}

#[test]
fn seed_document_validates() {
    let generator = PatternGenerator::new(Some(reference_user()));
    let doc = generator.into_document("2024-06-01T00:00:00Z");
    let result = validate_document(&doc);
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert_eq!(doc.metadata.bars, 1);
    assert_eq!(doc.metadata.steps, 16);
}

#[test]
fn explicit_seed_overrides_identity_seed() {
    let a = PatternGenerator::with_seed(Some(reference_user()), 1).generate();
    let b = PatternGenerator::with_seed(Some(reference_user()), 2).generate();
    // Same constraints and templates, different variation stream.
    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
}
