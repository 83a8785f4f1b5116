//! Shared state handles between the generation path and the tick path.
//!
//! The published song document is the only state shared between asynchronous
//! producers (generation, expansion) and the real-time consumer (the tick).
//! It is copy-on-write: producers build a complete document off the tick
//! path and publish it with one reference swap; the tick dereferences once
//! per tick and works from that snapshot for the whole tick.
//!
//! The live mix is single-writer (the UI) / many-reader (the tick) and is
//! likewise read once per tick through a guard.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use basedrum_spec::song::SongDocument;

/// Shared handle to the currently published song document.
#[derive(Clone, Debug)]
pub struct DocumentHandle {
    current: Arc<RwLock<Arc<SongDocument>>>,
}

impl DocumentHandle {
    /// Publishes an initial document.
    pub fn new(doc: SongDocument) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(doc))),
        }
    }

    /// Atomically replaces the published document.
    ///
    /// Callers must validate the document first; the handle publishes
    /// whatever it is given. The swap is a single reference assignment, so
    /// the tick path sees either the old or the new document, never a mix.
    pub fn publish(&self, doc: SongDocument) {
        *self.current.write() = Arc::new(doc);
    }

    /// Returns the currently published document.
    pub fn snapshot(&self) -> Arc<SongDocument> {
        self.current.read().clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TrackOverride {
    muted: bool,
    volume_offset: f64,
}

/// Live per-track mute/volume overrides layered over the document.
#[derive(Clone, Debug, Default)]
pub struct LiveMix {
    overrides: Arc<RwLock<HashMap<String, TrackOverride>>>,
}

impl LiveMix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutes or unmutes a track. Single-writer: call from one control thread.
    pub fn set_muted(&self, name: &str, muted: bool) {
        self.overrides.write().entry(name.to_string()).or_default().muted = muted;
    }

    /// Sets an additional dB offset for a track.
    pub fn set_volume_offset(&self, name: &str, offset_db: f64) {
        self.overrides
            .write()
            .entry(name.to_string())
            .or_default()
            .volume_offset = offset_db;
    }

    /// Drops all overrides.
    pub fn reset(&self) {
        self.overrides.write().clear();
    }

    /// Takes a read guard for one tick's worth of lookups.
    pub fn read(&self) -> LiveMixGuard<'_> {
        LiveMixGuard {
            guard: self.overrides.read(),
        }
    }
}

/// One tick's consistent view of the live mix.
pub struct LiveMixGuard<'a> {
    guard: parking_lot::RwLockReadGuard<'a, HashMap<String, TrackOverride>>,
}

impl LiveMixGuard<'_> {
    pub fn is_muted(&self, name: &str) -> bool {
        self.guard.get(name).map(|o| o.muted).unwrap_or(false)
    }

    pub fn volume_offset(&self, name: &str) -> f64 {
        self.guard.get(name).map(|o| o.volume_offset).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basedrum_spec::song::{SongEffects, SongMetadata};

    fn doc(title: &str) -> SongDocument {
        SongDocument::new(
            SongMetadata::new(title, 120, 1, "2024-06-01T00:00:00Z"),
            SongEffects::default(),
        )
    }

    #[test]
    fn publish_swaps_for_all_clones() {
        let handle = DocumentHandle::new(doc("first"));
        let other = handle.clone();
        assert_eq!(other.snapshot().metadata.title, "first");

        handle.publish(doc("second"));
        assert_eq!(other.snapshot().metadata.title, "second");
    }

    #[test]
    fn snapshot_outlives_a_swap() {
        let handle = DocumentHandle::new(doc("old"));
        let held = handle.snapshot();
        handle.publish(doc("new"));
        // The earlier snapshot still reads consistently.
        assert_eq!(held.metadata.title, "old");
        assert_eq!(handle.snapshot().metadata.title, "new");
    }

    #[test]
    fn mix_overrides_default_to_neutral() {
        let mix = LiveMix::new();
        {
            let view = mix.read();
            assert!(!view.is_muted("kick"));
            assert_eq!(view.volume_offset("kick"), 0.0);
        }

        mix.set_muted("kick", true);
        mix.set_volume_offset("hats", -6.0);
        let view = mix.read();
        assert!(view.is_muted("kick"));
        assert_eq!(view.volume_offset("hats"), -6.0);

        drop(view);
        mix.reset();
        assert!(!mix.read().is_muted("kick"));
    }
}
