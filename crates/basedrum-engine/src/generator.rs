//! The stochastic pattern generator.
//!
//! For each instrument role this picks a base template by constraint band,
//! then applies bounded seeded variation. Variation never touches structural
//! downbeats (every fourth step), so the groove anchor of the chosen template
//! survives any complexity level. Roles are generated in a fixed priority
//! order and gated by constraint thresholds, so sparse identities get fewer
//! simultaneous instruments, not just sparser individual patterns.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use basedrum_spec::hash::derive_seed;
use basedrum_spec::song::{SongDocument, SongEffects, SongMetadata, SongTrack};
use basedrum_spec::user::UserData;

use crate::constraints::{extract_constraints, MusicalConstraints};
use crate::library::{
    foundation_template, harmony_template, lead_template, rhythm_template, texture_template,
    Role, Template,
};
use crate::note::scale_degree_name;
use crate::rng::SeededRandom;

/// Variation weight bands: (complexity ceiling, add weight, remove weight).
const VARIATION_BANDS: [(f64, f64, f64); 3] = [
    (0.4, 0.10, 0.10),
    (0.7, 0.20, 0.20),
    (f64::INFINITY, 0.30, 0.25),
];

/// Octave each melodic role plays in.
const HARMONY_OCTAVE: i8 = 2;
const LEAD_OCTAVE: i8 = 4;

/// One generated instrument track, with the data trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTrack {
    /// Stable track id, used as the document track name.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Instrument role.
    pub role: Role,
    /// Voice preset id resolved by the playback layer.
    pub preset: String,
    /// Track volume in dB.
    pub volume: f64,
    /// Named effect-parameter values, each normalized to [0, 1].
    pub effects: BTreeMap<String, f64>,
    /// Step indices, ascending.
    pub pattern: Vec<u32>,
    /// Pitch names parallel to `pattern` for melodic roles.
    pub notes: Option<Vec<String>>,
    /// Human-readable tie back to the data field that shaped this track.
    pub reason: String,
}

/// Applies bounded stochastic variation to a step grid in place.
///
/// Empty non-downbeat slots gain a hit with the band's add weight; filled
/// non-downbeat slots lose theirs with the remove weight. Slots on a
/// structural downbeat (index mod 4 == 0) are never modified in either
/// direction. Melodic additions draw a scale degree from the same seeded
/// stream.
pub fn apply_variation(slots: &mut [u8], complexity: f64, rng: &mut SeededRandom, melodic: bool) {
    let (add_weight, remove_weight) = variation_weights(complexity);
    for (index, slot) in slots.iter_mut().enumerate() {
        if index % 4 == 0 {
            continue;
        }
        if *slot == 0 {
            if rng.chance(add_weight) {
                *slot = if melodic { rng.gen_range(1..=7) } else { 1 };
            }
        } else if rng.chance(remove_weight) {
            *slot = 0;
        }
    }
}

fn variation_weights(complexity: f64) -> (f64, f64) {
    for &(ceiling, add, remove) in &VARIATION_BANDS {
        if complexity <= ceiling {
            return (add, remove);
        }
    }
    let (_, add, remove) = VARIATION_BANDS[VARIATION_BANDS.len() - 1];
    (add, remove)
}

/// Deterministic per-identity pattern generator.
pub struct PatternGenerator {
    user: Option<UserData>,
    constraints: MusicalConstraints,
    rng: SeededRandom,
}

impl PatternGenerator {
    /// Creates a generator seeded from the snapshot itself.
    pub fn new(user: Option<UserData>) -> Self {
        let seed = derive_seed(user.as_ref());
        Self::with_seed(user, seed)
    }

    /// Creates a generator with an explicit seed override.
    pub fn with_seed(user: Option<UserData>, seed: u32) -> Self {
        let constraints = extract_constraints(user.as_ref());
        Self {
            user,
            constraints,
            rng: SeededRandom::new(seed),
        }
    }

    /// The constraints derived for this identity.
    pub fn constraints(&self) -> &MusicalConstraints {
        &self.constraints
    }

    /// Generates every track the constraints admit, in priority order.
    pub fn generate(&mut self) -> Vec<GeneratedTrack> {
        Role::all()
            .iter()
            .filter(|&&role| self.includes(role))
            .copied()
            .collect::<Vec<_>>()
            .into_iter()
            .map(|role| self.generate_track(role))
            .collect()
    }

    /// Generates the tracks and assembles a validated one-bar seed document.
    pub fn into_document(mut self, created: &str) -> SongDocument {
        let tracks = self.generate();
        self.document_for(&tracks, created)
    }

    /// Assembles the seed document for already-generated tracks.
    pub fn document_for(&self, tracks: &[GeneratedTrack], created: &str) -> SongDocument {
        let metadata = SongMetadata::new(self.title(), self.constraints.tempo, 1, created);

        let mut effects = SongEffects::default();
        effects.filter.cutoff = self.constraints.energy;
        effects.reverb.wet = 0.15 + 0.25 * self.constraints.complexity;
        effects.reverb.decay = 1.0 + 3.0 * self.constraints.complexity;

        let mut doc = SongDocument::new(metadata, effects);
        for track in tracks {
            let song_track = match &track.notes {
                Some(notes) => {
                    SongTrack::melodic(track.pattern.clone(), notes.clone(), track.volume)
                }
                None => SongTrack::hits(track.pattern.clone(), track.volume),
            };
            doc.insert_track(track.id.clone(), song_track);
        }
        doc
    }

    fn includes(&self, role: Role) -> bool {
        match role {
            Role::Foundation => true,
            Role::Rhythm => self.constraints.density > 0.3,
            Role::Harmony => self.constraints.energy > 0.4,
            Role::Texture => self.constraints.complexity > 0.5,
            Role::Lead => self.constraints.density > 0.7,
        }
    }

    fn generate_track(&mut self, role: Role) -> GeneratedTrack {
        let template = self.template_for(role);
        let mut slots = template.steps.to_vec();
        apply_variation(
            &mut slots,
            self.constraints.complexity,
            &mut self.rng,
            role.is_melodic(),
        );

        let pattern: Vec<u32> = slots
            .iter()
            .enumerate()
            .filter(|(_, &slot)| slot != 0)
            .map(|(i, _)| i as u32)
            .collect();

        let notes = role.is_melodic().then(|| {
            let octave = match role {
                Role::Lead => LEAD_OCTAVE,
                _ => HARMONY_OCTAVE,
            };
            slots
                .iter()
                .filter(|&&slot| slot != 0)
                .map(|&degree| {
                    scale_degree_name(
                        self.constraints.key,
                        self.constraints.mode.intervals(),
                        degree,
                        octave,
                    )
                })
                .collect()
        });

        GeneratedTrack {
            id: track_id(role).to_string(),
            name: display_name(role).to_string(),
            role,
            preset: preset_for(role).to_string(),
            volume: volume_for(role),
            effects: effects_for(role, &self.constraints),
            pattern,
            notes,
            reason: self.reason_for(role, template),
        }
    }

    fn template_for(&self, role: Role) -> &'static Template {
        match role {
            Role::Foundation => foundation_template(self.constraints.energy),
            Role::Rhythm => rhythm_template(self.constraints.density),
            Role::Harmony => harmony_template(self.constraints.complexity),
            Role::Texture => texture_template(self.constraints.density),
            Role::Lead => lead_template(self.constraints.energy),
        }
    }

    fn reason_for(&self, role: Role, template: &Template) -> String {
        let Some(user) = &self.user else {
            return format!("Default {} groove; connect a wallet to personalize it", role);
        };
        match role {
            Role::Foundation => format!(
                "Your {} transactions drive a {} kick",
                user.transaction_count(),
                template.name
            ),
            Role::Rhythm => format!(
                "{} followers against {} following snap a {} snare",
                user.follower_count(),
                user.following_count(),
                template.name
            ),
            Role::Harmony => format!(
                "A balance of {} ETH grounds a {} bassline in {}",
                user.wallet.balance,
                template.name,
                self.constraints.key_name()
            ),
            Role::Texture => format!(
                "{} tokens and {} NFTs shimmer through {} hats",
                user.token_count(),
                user.nft_count(),
                template.name
            ),
            Role::Lead => format!(
                "Heavy activity ({} transactions) earns a {} lead line",
                user.transaction_count(),
                template.name
            ),
        }
    }

    fn title(&self) -> String {
        match &self.user {
            Some(user) => {
                if let Some(username) = &user.farcaster.username {
                    format!("@{} onchain", username)
                } else if user.wallet.address.len() >= 10 {
                    let address = &user.wallet.address;
                    format!("Wallet {}…{}", &address[..6], &address[address.len() - 4..])
                } else {
                    "Onchain Session".to_string()
                }
            }
            None => "Default Session".to_string(),
        }
    }
}

fn track_id(role: Role) -> &'static str {
    match role {
        Role::Foundation => "kick",
        Role::Rhythm => "snare",
        Role::Harmony => "bass",
        Role::Texture => "hats",
        Role::Lead => "lead",
    }
}

fn display_name(role: Role) -> &'static str {
    match role {
        Role::Foundation => "Kick",
        Role::Rhythm => "Snare",
        Role::Harmony => "Bass",
        Role::Texture => "Hats",
        Role::Lead => "Lead",
    }
}

fn preset_for(role: Role) -> &'static str {
    match role {
        Role::Foundation => "kick-909",
        Role::Rhythm => "snare-909",
        Role::Harmony => "bass-sub",
        Role::Texture => "hat-606",
        Role::Lead => "lead-saw",
    }
}

fn volume_for(role: Role) -> f64 {
    match role {
        Role::Foundation => -4.0,
        Role::Rhythm => -8.0,
        Role::Harmony => -9.0,
        Role::Texture => -14.0,
        Role::Lead => -10.0,
    }
}

fn effects_for(role: Role, constraints: &MusicalConstraints) -> BTreeMap<String, f64> {
    let mut effects = BTreeMap::new();
    match role {
        Role::Foundation => {
            effects.insert("drive".to_string(), constraints.energy);
        }
        Role::Rhythm => {
            effects.insert("snap".to_string(), constraints.density);
        }
        Role::Harmony => {
            effects.insert("cutoff".to_string(), constraints.energy);
        }
        Role::Texture => {
            effects.insert("decay".to_string(), constraints.complexity);
        }
        Role::Lead => {
            effects.insert("space".to_string(), constraints.complexity);
        }
    }
    effects
}

#[cfg(test)]
mod tests;
