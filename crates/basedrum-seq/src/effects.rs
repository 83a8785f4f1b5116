//! Tagged effect-parameter mappings.
//!
//! Documents and generated tracks carry effect parameters as normalized
//! [0, 1] values. Each effect kind declares its own mapping from that
//! normalized value to the concrete unit the voice layer consumes, selected
//! by this tag rather than by inspecting the effect object at runtime.

/// An effect parameter the playback layer knows how to concretize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Filter cutoff: exponential sweep, 20 Hz - 20 kHz.
    FilterCutoff,
    /// Reverb wet mix: linear 0-1.
    ReverbWet,
    /// Reverb room size: linear 0-1.
    ReverbRoomSize,
    /// Reverb decay: linear 0-10 s.
    ReverbDecay,
    /// Voice drive: linear 1-4 gain.
    Drive,
    /// Amplitude envelope decay: exponential, 30 ms - 1.5 s.
    EnvelopeDecay,
}

impl EffectKind {
    /// Resolves a parameter name as used in documents and generated tracks.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cutoff" => Some(EffectKind::FilterCutoff),
            "wet" => Some(EffectKind::ReverbWet),
            "roomSize" => Some(EffectKind::ReverbRoomSize),
            "reverbDecay" => Some(EffectKind::ReverbDecay),
            "drive" => Some(EffectKind::Drive),
            "decay" => Some(EffectKind::EnvelopeDecay),
            _ => None,
        }
    }

    /// Maps a normalized value to this kind's concrete parameter. Inputs are
    /// clamped into [0, 1] first.
    pub fn concrete(&self, normalized: f64) -> f64 {
        let v = normalized.clamp(0.0, 1.0);
        match self {
            EffectKind::FilterCutoff => 20.0 * 1000f64.powf(v),
            EffectKind::ReverbWet => v,
            EffectKind::ReverbRoomSize => v,
            EffectKind::ReverbDecay => 10.0 * v,
            EffectKind::Drive => 1.0 + 3.0 * v,
            EffectKind::EnvelopeDecay => 0.03 * 50f64.powf(v),
        }
    }

    /// Unit suffix for display.
    pub fn unit(&self) -> &'static str {
        match self {
            EffectKind::FilterCutoff => "Hz",
            EffectKind::ReverbWet | EffectKind::ReverbRoomSize => "",
            EffectKind::ReverbDecay | EffectKind::EnvelopeDecay => "s",
            EffectKind::Drive => "x",
        }
    }
}
