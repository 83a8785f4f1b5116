//! Lookahead scheduler thread driving the sequencer.
//!
//! The transport owns the sequencer and engine context behind locks, walks an
//! ideal musical timeline (`next = prev + step duration`, re-read each tick
//! so tempo follows document swaps), and sleeps on a stop channel between
//! ticks. Ticks are stamped with their ideal time, not the wall clock they
//! ran at, so triggers stay drift-free even when the thread wakes late.
//! Stopping is safe from any thread at any time: the worker is signalled,
//! joined, and the sequencer rewound before `stop` returns, so nothing can
//! fire afterwards.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::engine::{EngineContext, EngineError};
use crate::sequencer::StepSequencer;

/// Thread-driven transport around a sequencer and its engine context.
pub struct Transport {
    sequencer: Arc<Mutex<StepSequencer>>,
    engine: Arc<Mutex<EngineContext>>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Transport {
    /// Wraps a sequencer and an engine context. The engine must be
    /// initialized before `play` will start.
    pub fn new(sequencer: StepSequencer, engine: EngineContext) -> Self {
        Self {
            sequencer: Arc::new(Mutex::new(sequencer)),
            engine: Arc::new(Mutex::new(engine)),
            stop_tx: None,
            worker: None,
        }
    }

    /// Shared handle to the sequencer, for observers and control surfaces.
    pub fn sequencer(&self) -> Arc<Mutex<StepSequencer>> {
        Arc::clone(&self.sequencer)
    }

    /// Shared handle to the engine context.
    pub fn engine(&self) -> Arc<Mutex<EngineContext>> {
        Arc::clone(&self.engine)
    }

    /// Whether the worker thread is live.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts playback, or stops it if already running (toggling transport).
    ///
    /// Fails without touching the sequencer when the engine context is not
    /// ready, so a refused audio start leaves no inconsistent state behind.
    pub fn play(&mut self) -> Result<(), EngineError> {
        if self.worker.is_some() {
            self.stop();
            return Ok(());
        }

        self.engine.lock().ensure_ready()?;
        self.sequencer.lock().play();

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let sequencer = Arc::clone(&self.sequencer);
        let engine = Arc::clone(&self.engine);

        let worker = thread::spawn(move || {
            let start = Instant::now();
            let mut next_tick = 0.0f64;
            loop {
                let now = start.elapsed().as_secs_f64();
                if now >= next_tick {
                    let mut seq = sequencer.lock();
                    if !seq.is_running() {
                        break;
                    }
                    let step_duration = seq.step_duration();
                    let mut engine = engine.lock();
                    seq.tick(engine.voices_mut(), next_tick);
                    next_tick += step_duration;
                    continue;
                }
                let wait = Duration::from_secs_f64(next_tick - now);
                match stop_rx.recv_timeout(wait) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }
        });

        self.stop_tx = Some(stop_tx);
        self.worker = Some(worker);
        Ok(())
    }

    /// Stops playback, cancels all pending ticks, and rewinds.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        self.sequencer.lock().stop();
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.stop();
    }
}
