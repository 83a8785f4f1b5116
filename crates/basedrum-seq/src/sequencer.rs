//! The step sequencer state machine.
//!
//! Two states, no pause: `play()` on a stopped sequencer starts the
//! transport; `play()` again (or `stop()`) halts it, cancels everything
//! pending, and rewinds to step 0. The step counter increases monotonically
//! and wraps modulo the *current* document's step count, so a published
//! document swap changes the wrap point on the very next tick while the
//! phase position carries straight through.

use basedrum_spec::song::{SILENCE_FLOOR_DB, STEPS_PER_BAR};

use crate::handle::{DocumentHandle, LiveMix};
use crate::sections::SectionVolumeMap;
use crate::voice::{TriggerEvent, VoiceBank};

/// Steps per beat: the grid is sixteenth notes.
pub const SUBDIVISIONS_PER_BEAT: u32 = 4;

/// Beat-intensity decay envelope: (seconds after the tick, value).
const INTENSITY_ENVELOPE: [(f64, f64); 5] = [
    (0.000, 1.0),
    (0.080, 0.7),
    (0.160, 0.4),
    (0.240, 0.1),
    (0.320, 0.0),
];

/// Track names whose hits carry beat intensity for visualization.
const BEAT_INTENSITY_TRACKS: [&str; 3] = ["kick", "snare", "pulse"];

/// Role-default velocities by track name.
const DEFAULT_VELOCITIES: [(&str, f64); 6] = [
    ("kick", 1.0),
    ("snare", 0.9),
    ("bass", 0.8),
    ("hats", 0.6),
    ("lead", 0.75),
    ("melody", 0.75),
];
const FALLBACK_VELOCITY: f64 = 0.8;

/// Velocity scale for ghost-note hits.
const GHOST_VELOCITY: f64 = 0.3;

/// Transport state. Stopping always rewinds; there is no pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Running,
}

/// Observer of playback position and beat intensity.
///
/// Callbacks are invoked from the tick path and must not block.
pub trait SequencerObserver: Send {
    /// Fired once per tick with the display step: the position within the
    /// current 16-step bar, so indicators stay meaningful for long
    /// arrangements.
    fn on_step_change(&mut self, step: u32);

    /// Fired zero or more times per tick following the decay envelope, with
    /// the audio-clock time each value applies at.
    fn on_beat_intensity(&mut self, value: f64, at: f64);
}

/// Seconds per sixteenth-note step at a tempo.
pub fn step_seconds(bpm: u16) -> f64 {
    60.0 / bpm as f64 / SUBDIVISIONS_PER_BEAT as f64
}

fn db_to_gain(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

fn default_velocity(track: &str) -> f64 {
    DEFAULT_VELOCITIES
        .iter()
        .find(|&&(name, _)| name == track)
        .map(|&(_, v)| v)
        .unwrap_or(FALLBACK_VELOCITY)
}

/// The step sequencer.
pub struct StepSequencer {
    document: DocumentHandle,
    mix: LiveMix,
    sections: SectionVolumeMap,
    observers: Vec<Box<dyn SequencerObserver>>,
    state: TransportState,
    step: u64,
}

impl StepSequencer {
    /// Creates a stopped sequencer reading from the given handles.
    pub fn new(document: DocumentHandle, mix: LiveMix, sections: SectionVolumeMap) -> Self {
        Self {
            document,
            mix,
            sections,
            observers: Vec::new(),
            state: TransportState::Stopped,
            step: 0,
        }
    }

    /// Registers a playback observer.
    pub fn add_observer(&mut self, observer: Box<dyn SequencerObserver>) {
        self.observers.push(observer);
    }

    /// Replaces the section map, e.g. when an expanded arrangement lands.
    pub fn set_sections(&mut self, sections: SectionVolumeMap) {
        self.sections = sections;
    }

    /// The document handle this sequencer reads from.
    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TransportState::Running
    }

    /// Monotonic step counter since `play()`.
    pub fn current_step(&self) -> u64 {
        self.step
    }

    /// Seconds per step at the current document's tempo.
    pub fn step_duration(&self) -> f64 {
        step_seconds(self.document.snapshot().metadata.bpm)
    }

    /// Toggling transport control: starts when stopped, stops when running.
    pub fn play(&mut self) -> TransportState {
        match self.state {
            TransportState::Stopped => self.state = TransportState::Running,
            TransportState::Running => self.stop(),
        }
        self.state
    }

    /// Halts the transport and rewinds to step 0. Ticks after this are
    /// no-ops until `play()` runs again, so nothing pending can fire.
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        self.step = 0;
    }

    /// Processes one subdivision tick at audio-clock time `now`.
    ///
    /// Reads the currently published document exactly once and works from
    /// that snapshot for the whole tick. Every voice trigger issued here
    /// carries `now` as its start time, keeping multi-instrument hits
    /// sample-synchronized regardless of track iteration order. The tick
    /// path never errors: unreachable pattern indices and unregistered
    /// voices are silent no-ops.
    pub fn tick(&mut self, voices: &mut VoiceBank, now: f64) {
        if self.state != TransportState::Running {
            return;
        }

        let doc = self.document.snapshot();
        let total = doc.step_count().max(1) as u64;
        let step = (self.step % total) as u32;
        let bar = doc.bar_of_step(step);
        let seconds_per_step = step_seconds(doc.metadata.bpm);
        let mix = self.mix.read();

        for (name, track) in &doc.tracks {
            if track.muted || mix.is_muted(name) {
                continue;
            }
            let volume_db =
                track.volume + mix.volume_offset(name) + self.sections.offset(bar, name);
            if volume_db < SILENCE_FLOOR_DB {
                continue;
            }
            let Some(position) = track.position_of(step) else {
                // Ghost notes are quieter extra hits outside the main pattern.
                if let Some(ghosts) = &track.ghost_notes {
                    if ghosts.contains(&step) {
                        if let Some(voice) = voices.get_mut(name) {
                            voice.trigger(&TriggerEvent {
                                note: None,
                                velocity: default_velocity(name)
                                    * GHOST_VELOCITY
                                    * db_to_gain(volume_db),
                                duration: seconds_per_step,
                                time: now,
                            });
                        }
                    }
                }
                continue;
            };
            let velocity = track
                .velocity
                .as_ref()
                .and_then(|v| v.get(position))
                .copied()
                .unwrap_or_else(|| default_velocity(name));
            let note = track.notes.as_ref().and_then(|n| n.get(position)).cloned();
            let duration = if note.is_some() {
                seconds_per_step * 2.0
            } else {
                seconds_per_step
            };
            let event = TriggerEvent {
                note,
                velocity: velocity * db_to_gain(volume_db),
                duration,
                time: now,
            };
            if let Some(voice) = voices.get_mut(name) {
                voice.trigger(&event);
            }
        }
        drop(mix);

        // Observer notifications are not gated by mute state.
        let display_step = step % STEPS_PER_BAR;
        let intensity_hit = doc.tracks.iter().any(|(name, track)| {
            BEAT_INTENSITY_TRACKS.contains(&name.as_str()) && track.position_of(step).is_some()
        });
        for observer in &mut self.observers {
            observer.on_step_change(display_step);
            if intensity_hit {
                for &(offset, value) in &INTENSITY_ENVELOPE {
                    observer.on_beat_intensity(value, now + offset);
                }
            }
        }

        self.step += 1;
    }
}
