//! Song document types.
//!
//! The song document is the canonical interchange format between the
//! generators, the playback engine, and the remote producer pass. Documents
//! are immutable snapshots: edits happen by building a new document and
//! publishing it, never by mutating one in place under the sequencer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Format tag every supported document must carry.
pub const SONG_FORMAT: &str = "basedrum-v1";

/// Steps per bar; the grid subdivision is fixed at sixteenth notes.
pub const STEPS_PER_BAR: u32 = 16;

/// Minimum tempo in BPM.
pub const MIN_BPM: u16 = 60;
/// Maximum tempo in BPM.
pub const MAX_BPM: u16 = 200;
/// Minimum bar count.
pub const MIN_BARS: u16 = 1;
/// Maximum bar count.
pub const MAX_BARS: u16 = 128;
/// Minimum total step count.
pub const MIN_STEPS: u32 = 16;
/// Maximum total step count.
pub const MAX_STEPS: u32 = 2048;

/// Track volume below which a track is treated as silent at trigger time.
pub const SILENCE_FLOOR_DB: f64 = -60.0;

/// Song metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    /// Track title.
    pub title: String,
    /// Artist credit.
    pub artist: String,
    /// Document revision string.
    pub version: String,
    /// ISO-8601 creation timestamp.
    pub created: String,
    /// Tempo in beats per minute (60-200).
    pub bpm: u16,
    /// Number of bars (1-128).
    pub bars: u16,
    /// Total step count; must equal `bars * 16`.
    pub steps: u32,
    /// Format tag; must equal [`SONG_FORMAT`].
    pub format: String,
}

impl SongMetadata {
    /// Creates metadata for a new document with the standard artist credit
    /// and format tag.
    pub fn new(title: impl Into<String>, bpm: u16, bars: u16, created: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: "basedrum".to_string(),
            version: "1.0".to_string(),
            created: created.into(),
            bpm,
            bars,
            steps: bars as u32 * STEPS_PER_BAR,
            format: SONG_FORMAT.to_string(),
        }
    }
}

/// Filter response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Master filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    /// Normalized cutoff position (0-1).
    pub cutoff: f64,
    /// Filter response shape.
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Sweep start frequency in Hz (20-20000).
    pub start_freq: f64,
    /// Sweep end frequency in Hz (20-20000).
    pub end_freq: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            cutoff: 0.8,
            kind: FilterKind::Lowpass,
            start_freq: 400.0,
            end_freq: 8000.0,
        }
    }
}

/// Master reverb settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverbSettings {
    /// Wet mix (0-1).
    pub wet: f64,
    /// Room size (0-1).
    pub room_size: f64,
    /// Decay time in seconds (0-10).
    pub decay: f64,
}

impl Default for ReverbSettings {
    fn default() -> Self {
        Self {
            wet: 0.25,
            room_size: 0.5,
            decay: 2.0,
        }
    }
}

/// Master effects block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SongEffects {
    pub filter: FilterSettings,
    pub reverb: ReverbSettings,
}

/// One instrument's pattern and mix state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongTrack {
    /// Step indices that trigger this track, strictly ascending, each
    /// `< metadata.steps`.
    pub pattern: Vec<u32>,
    /// Optional pitch names, parallel to `pattern` (melodic tracks).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    /// Optional per-hit velocity overrides (0-1), parallel to `pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vec<f64>>,
    /// Optional quieter off-grid hits, same index rules as `pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost_notes: Option<Vec<u32>>,
    /// Whether the track is muted.
    #[serde(default)]
    pub muted: bool,
    /// Track volume in dB.
    pub volume: f64,
}

impl SongTrack {
    /// Creates a plain percussive track from step indices.
    pub fn hits(pattern: Vec<u32>, volume: f64) -> Self {
        Self {
            pattern,
            notes: None,
            velocity: None,
            ghost_notes: None,
            muted: false,
            volume,
        }
    }

    /// Creates a melodic track with pitch names parallel to the pattern.
    pub fn melodic(pattern: Vec<u32>, notes: Vec<String>, volume: f64) -> Self {
        Self {
            pattern,
            notes: Some(notes),
            velocity: None,
            ghost_notes: None,
            muted: false,
            volume,
        }
    }

    /// Returns the position of `step` within the pattern, if present.
    ///
    /// Patterns are canonically ascending, so membership is a binary search.
    pub fn position_of(&self, step: u32) -> Option<usize> {
        self.pattern.binary_search(&step).ok()
    }
}

/// Which tracks a section plays: the literal `"all"` or an explicit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveTracks {
    /// A literal string; only `"all"` is valid.
    Literal(String),
    /// Explicit track-name list.
    Named(Vec<String>),
}

impl ActiveTracks {
    /// The `"all"` literal.
    pub fn all() -> Self {
        ActiveTracks::Literal("all".to_string())
    }

    /// Returns true if this selects every track.
    pub fn is_all(&self) -> bool {
        matches!(self, ActiveTracks::Literal(s) if s == "all")
    }

    /// Returns true if this selects the named track.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            ActiveTracks::Literal(_) => self.is_all(),
            ActiveTracks::Named(names) => names.iter().any(|n| n == name),
        }
    }
}

/// A named section of the arrangement: an inclusive 1-based bar range and the
/// tracks active within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementSection {
    /// Inclusive `[start, end]` bar range, 1-based.
    pub bars: [u16; 2],
    /// Tracks active in this section.
    pub active_tracks: ActiveTracks,
}

/// The canonical song document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDocument {
    pub metadata: SongMetadata,
    pub effects: SongEffects,
    /// Track name to pattern mapping. Ordered so serialization and hashing
    /// are deterministic.
    pub tracks: BTreeMap<String, SongTrack>,
    /// Optional named sections over bar ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<BTreeMap<String, ArrangementSection>>,
}

impl SongDocument {
    /// Creates an empty document with the given metadata and effects.
    pub fn new(metadata: SongMetadata, effects: SongEffects) -> Self {
        Self {
            metadata,
            effects,
            tracks: BTreeMap::new(),
            arrangement: None,
        }
    }

    /// Inserts a track under the given name.
    pub fn insert_track(&mut self, name: impl Into<String>, track: SongTrack) {
        self.tracks.insert(name.into(), track);
    }

    /// Returns the named track, if present.
    pub fn track(&self, name: &str) -> Option<&SongTrack> {
        self.tracks.get(name)
    }

    /// Total step count of the document.
    pub fn step_count(&self) -> u32 {
        self.metadata.steps
    }

    /// Returns the 1-based bar index containing `step`.
    pub fn bar_of_step(&self, step: u32) -> u16 {
        (step / STEPS_PER_BAR) as u16 + 1
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
