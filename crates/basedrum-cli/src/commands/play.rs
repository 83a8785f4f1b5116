//! Play command implementation.
//!
//! Drives the transport against console voices that print every trigger.
//! The real product registers synth voices here instead; the sequencer
//! neither knows nor cares.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use std::time::Duration;

use basedrum_seq::engine::EngineContext;
use basedrum_seq::handle::{DocumentHandle, LiveMix};
use basedrum_seq::sections::SectionVolumeMap;
use basedrum_seq::sequencer::{step_seconds, SequencerObserver, StepSequencer};
use basedrum_seq::transport::Transport;
use basedrum_seq::voice::{TriggerEvent, Voice};

use crate::input::load_document;

struct ConsoleVoice {
    name: String,
}

impl Voice for ConsoleVoice {
    fn trigger(&mut self, event: &TriggerEvent) {
        let note = event.note.as_deref().unwrap_or("·");
        println!(
            "  {:>8.3}s  {:<8} {:<4} vel {:.2}",
            event.time,
            self.name.bold(),
            note,
            event.velocity
        );
    }
}

struct BarPrinter;

impl SequencerObserver for BarPrinter {
    fn on_step_change(&mut self, step: u32) {
        if step == 0 {
            println!("{}", "  ── bar ──".dimmed());
        }
    }

    fn on_beat_intensity(&mut self, _value: f64, _at: f64) {}
}

/// Run the play command for a number of bars.
pub fn run(path: &str, bars: u32) -> Result<ExitCode> {
    let doc = load_document(path)?;
    let bpm = doc.metadata.bpm;
    let sections = SectionVolumeMap::for_document(&doc);

    let mut engine = EngineContext::new(44_100);
    for name in doc.tracks.keys() {
        engine
            .voices_mut()
            .insert(name.clone(), Box::new(ConsoleVoice { name: name.clone() }));
    }
    engine.initialize(|| Ok(()))?;

    let mut sequencer = StepSequencer::new(DocumentHandle::new(doc), LiveMix::new(), sections);
    sequencer.add_observer(Box::new(BarPrinter));

    println!(
        "{} {} bars at {} BPM",
        "Playing:".cyan().bold(),
        bars,
        bpm
    );

    let mut transport = Transport::new(sequencer, engine);
    transport.play()?;
    std::thread::sleep(Duration::from_secs_f64(
        step_seconds(bpm) * 16.0 * bars as f64,
    ));
    transport.stop();

    println!("{}", "Stopped.".cyan().bold());
    Ok(ExitCode::SUCCESS)
}
