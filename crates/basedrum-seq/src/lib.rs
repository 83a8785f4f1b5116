//! basedrum Sequencing Engine - Sample-Accurate Pattern Playback
//!
//! This crate walks a song document's fixed-subdivision step grid in real
//! time, triggers instrument voices with shared per-tick timestamps, applies
//! section-aware dynamic mixing, and reports playback position and beat
//! intensity to observers.
//!
//! # Liveness
//!
//! The sequencer reads the *current* published document once per tick, never
//! a snapshot captured at start. Publishing a new document (for example the
//! producer-expanded arrangement superseding the seed loop) takes effect on
//! the very next tick without restarting playback or losing phase.
//!
//! # Real-time discipline
//!
//! Nothing inside the per-tick path blocks, suspends, or returns errors:
//! malformed indices are unreachable no-ops and missing voices are silent.
//! Asynchronous work (engine bring-up, document generation and expansion)
//! happens entirely outside the tick and hands results over through
//! [`handle::DocumentHandle`] with a single reference swap.
//!
//! # Modules
//!
//! - [`effects`]: Tagged normalized-to-concrete effect-parameter mappings
//! - [`voice`]: Opaque voice trait and the owned voice registry
//! - [`engine`]: Explicitly constructed audio-engine context and lifecycle
//! - [`handle`]: Shared document and live-mix handles
//! - [`sections`]: Bar-range section lookup and per-instrument gain offsets
//! - [`sequencer`]: The step sequencer state machine
//! - [`transport`]: Lookahead scheduler thread driving the sequencer

pub mod effects;
pub mod engine;
pub mod handle;
pub mod sections;
pub mod sequencer;
pub mod transport;
pub mod voice;

pub use effects::EffectKind;
pub use engine::{EngineContext, EngineError, EngineState};
pub use handle::{DocumentHandle, LiveMix};
pub use sections::{Section, SectionVolumeMap};
pub use sequencer::{SequencerObserver, StepSequencer, TransportState};
pub use transport::Transport;
pub use voice::{TriggerEvent, Voice, VoiceBank};
