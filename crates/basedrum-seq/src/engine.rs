//! Explicitly constructed audio-engine context.
//!
//! The context owns the voice bank and the engine lifecycle:
//! `new -> initialize (may fail) -> use -> dispose`. Hosts that require a user
//! gesture before audio may start call `initialize` from that gesture; until
//! it succeeds the transport refuses to play, and a failed initialization
//! leaves no partial state behind.

use thiserror::Error;

use crate::voice::VoiceBank;

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, audio not yet started.
    Created,
    /// Initialized and usable.
    Ready,
    /// Disposed; unusable.
    Disposed,
}

/// Errors from engine bring-up and use.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// `initialize` has not succeeded yet.
    #[error("audio engine is not initialized; initialize() must succeed before playback")]
    NotInitialized,

    /// The context was disposed.
    #[error("audio engine context was disposed")]
    Disposed,

    /// The host audio backend refused to start.
    #[error("audio backend failed to start: {0}")]
    Backend(String),
}

/// Owned audio-engine context passed into the transport at startup.
#[derive(Debug)]
pub struct EngineContext {
    state: EngineState,
    sample_rate: u32,
    voices: VoiceBank,
}

impl EngineContext {
    /// Creates a context in the `Created` state.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            state: EngineState::Created,
            sample_rate,
            voices: VoiceBank::new(),
        }
    }

    /// Brings the engine up. Idempotent once ready.
    ///
    /// The closure performs the host-specific audio start (and is where a
    /// platform's user-gesture requirement surfaces). If it fails, the
    /// context stays in `Created` and can be retried.
    pub fn initialize<F>(&mut self, start_backend: F) -> Result<(), EngineError>
    where
        F: FnOnce() -> Result<(), EngineError>,
    {
        match self.state {
            EngineState::Ready => Ok(()),
            EngineState::Disposed => Err(EngineError::Disposed),
            EngineState::Created => {
                start_backend()?;
                self.state = EngineState::Ready;
                Ok(())
            }
        }
    }

    /// Errors unless the engine is ready for playback.
    pub fn ensure_ready(&self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Ready => Ok(()),
            EngineState::Created => Err(EngineError::NotInitialized),
            EngineState::Disposed => Err(EngineError::Disposed),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The owned voice registry.
    pub fn voices_mut(&mut self) -> &mut VoiceBank {
        &mut self.voices
    }

    /// Tears the engine down. Further use fails with [`EngineError::Disposed`].
    pub fn dispose(&mut self) {
        self.state = EngineState::Disposed;
    }
}
