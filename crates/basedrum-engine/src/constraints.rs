//! Identity snapshot to bounded musical constraints.
//!
//! Each constraint is an independent capped-linear function of one or more raw
//! fields. Every ratio lands in [0, 1] no matter how extreme or malformed the
//! input: counts saturate at their caps and negative values clamp to zero
//! before they are used. Floors keep degenerate identities from producing
//! silent tracks.

use basedrum_spec::hash::address_hash;
use basedrum_spec::user::UserData;

use crate::note::pitch_class_name;

// Tuning tables. Calibrated against the product's reference identities; keep
// as data, the mapping functions below must stay shape-agnostic.
const TEMPO_BASE: u16 = 120;
const TEMPO_SPAN: f64 = 50.0;
const TEMPO_SOCIAL_CAP: u64 = 700;
const TEMPO_MIN: u16 = 60;
const TEMPO_MAX: u16 = 200;

const DENSITY_FLOOR_PERMILLE: f64 = 300.0;
const DENSITY_SPAN_PERMILLE: f64 = 700.0;
const DENSITY_TX_CAP: u64 = 1000;

const ENERGY_FLOOR: f64 = 0.2;
const ENERGY_BALANCE_CAP: f64 = 10.0;
const ENERGY_TOKEN_CAP: u64 = 20;

const COMPLEXITY_FLOOR: f64 = 0.25;
const COMPLEXITY_TOKEN_CAP: u64 = 20;
const COMPLEXITY_NFT_CAP: u64 = 5;

const MODE_PROMOTION_DEFI_COUNT: usize = 3;

/// Scale flavor derived from the social graph and protocol footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Minor,
    Dorian,
    Mixolydian,
}

impl Mode {
    /// Returns the mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Dorian => "dorian",
            Mode::Mixolydian => "mixolydian",
        }
    }

    /// Semitone intervals of the seven scale degrees.
    pub fn intervals(&self) -> &'static [i32; 7] {
        match self {
            Mode::Major => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Mode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bounded musical constraints derived from one identity snapshot.
///
/// Recomputed once per snapshot; a pure value with no further lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicalConstraints {
    /// Tempo in BPM, clamped 60-200.
    pub tempo: u16,
    /// Key as a pitch class index (0 = C).
    pub key: u8,
    /// Scale mode.
    pub mode: Mode,
    /// Rhythmic density in [0, 1].
    pub density: f64,
    /// Mix energy in [0, 1].
    pub energy: f64,
    /// Variation appetite in [0, 1].
    pub complexity: f64,
}

impl MusicalConstraints {
    /// Human-readable key name, e.g. "C minor".
    pub fn key_name(&self) -> String {
        format!("{} {}", pitch_class_name(self.key), self.mode)
    }
}

impl Default for MusicalConstraints {
    /// Defaults used when no identity data is available.
    fn default() -> Self {
        Self {
            tempo: 140,
            key: 0,
            mode: Mode::Minor,
            density: 0.6,
            energy: 0.7,
            complexity: 0.5,
        }
    }
}

/// Derives musical constraints from an identity snapshot.
///
/// Absent data yields [`MusicalConstraints::default`]. Each constraint is a
/// pure function of the snapshot; no field of the snapshot is mutated.
pub fn extract_constraints(user: Option<&UserData>) -> MusicalConstraints {
    let Some(user) = user else {
        return MusicalConstraints::default();
    };

    MusicalConstraints {
        tempo: tempo_for(user.social_count()),
        key: (address_hash(&user.wallet.address) % 12) as u8,
        mode: mode_for(user),
        density: density_for(user.transaction_count()),
        energy: energy_for(user.wallet.balance, user.token_count()),
        complexity: complexity_for(user.token_count(), user.nft_count()),
    }
}

/// Larger social graphs run faster, saturating at the cap.
fn tempo_for(social_count: u64) -> u16 {
    let ratio = social_count.min(TEMPO_SOCIAL_CAP) as f64 / TEMPO_SOCIAL_CAP as f64;
    let tempo = TEMPO_BASE + (TEMPO_SPAN * ratio).round() as u16;
    tempo.clamp(TEMPO_MIN, TEMPO_MAX)
}

/// Transaction count maps to density on a permille lattice so the saturation
/// point is exactly 1.0.
fn density_for(transaction_count: u64) -> f64 {
    let ratio = transaction_count.min(DENSITY_TX_CAP) as f64 / DENSITY_TX_CAP as f64;
    (DENSITY_FLOOR_PERMILLE + DENSITY_SPAN_PERMILLE * ratio) / 1000.0
}

fn energy_for(balance: f64, token_count: u64) -> f64 {
    let balance_part = balance.clamp(0.0, ENERGY_BALANCE_CAP) / ENERGY_BALANCE_CAP;
    let token_part = token_count.min(ENERGY_TOKEN_CAP) as f64 / ENERGY_TOKEN_CAP as f64;
    ((balance_part + token_part) / 2.0).clamp(ENERGY_FLOOR, 1.0)
}

fn complexity_for(token_count: u64, nft_count: u64) -> f64 {
    let token_part = token_count.min(COMPLEXITY_TOKEN_CAP) as f64 / COMPLEXITY_TOKEN_CAP as f64;
    let nft_part = nft_count.min(COMPLEXITY_NFT_CAP) as f64 / COMPLEXITY_NFT_CAP as f64;
    ((token_part + nft_part) / 2.0).clamp(COMPLEXITY_FLOOR, 1.0)
}

/// Followers over following reads as major; a wide DeFi footprint promotes
/// either base mode to its modal cousin.
fn mode_for(user: &UserData) -> Mode {
    let bright = user.follower_count() > user.following_count();
    let modal = user.onchain.defi_protocols.len() >= MODE_PROMOTION_DEFI_COUNT;
    match (bright, modal) {
        (true, false) => Mode::Major,
        (true, true) => Mode::Mixolydian,
        (false, false) => Mode::Minor,
        (false, true) => Mode::Dorian,
    }
}
