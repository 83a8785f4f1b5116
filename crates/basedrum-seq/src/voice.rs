//! Opaque voices and the owned voice registry.
//!
//! A voice is a sound-producing unit: given a trigger event it makes sound.
//! How it synthesizes is none of the sequencer's business. Voices live in an
//! explicitly owned [`VoiceBank`] that is constructed at startup and passed
//! into the transport; there is no process-wide sound bank.

use std::collections::HashMap;

/// One trigger handed to a voice.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    /// Pitch name for melodic voices; `None` for unpitched hits.
    pub note: Option<String>,
    /// Effective velocity: per-step velocity times the linear track gain.
    pub velocity: f64,
    /// Note duration in seconds.
    pub duration: f64,
    /// Precise audio-clock time the sound must start, in seconds. Every
    /// trigger issued within one tick carries the same time.
    pub time: f64,
}

/// A sound-producing unit triggered by the sequencer.
pub trait Voice: Send {
    /// Fires the voice. Must not block; called from the tick path.
    fn trigger(&mut self, event: &TriggerEvent);
}

/// Owned registry mapping track names to voices.
#[derive(Default)]
pub struct VoiceBank {
    voices: HashMap<String, Box<dyn Voice>>,
}

impl VoiceBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a voice for a track name, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, voice: Box<dyn Voice>) {
        self.voices.insert(name.into(), voice);
    }

    /// Removes a voice.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Voice>> {
        self.voices.remove(name)
    }

    /// Returns the voice for a track, if registered. A track without a voice
    /// simply stays silent.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Voice + 'static)> {
        self.voices.get_mut(name).map(|v| &mut **v)
    }

    /// Registered track names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.voices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl std::fmt::Debug for VoiceBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceBank")
            .field("voices", &self.voices.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullVoice;
    impl Voice for NullVoice {
        fn trigger(&mut self, _event: &TriggerEvent) {}
    }

    #[test]
    fn bank_registers_and_replaces_voices() {
        let mut bank = VoiceBank::new();
        assert!(bank.is_empty());
        bank.insert("kick", Box::new(NullVoice));
        bank.insert("kick", Box::new(NullVoice));
        assert_eq!(bank.len(), 1);
        assert!(bank.get_mut("kick").is_some());
        assert!(bank.get_mut("snare").is_none());
    }
}
