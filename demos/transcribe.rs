//! Transcribes a pitch track into notes.
//!
//! The input is a JSON array of `[frequency, confidence]` pairs, one per
//! 256 sample hop at 16 kHz. Notes are printed, and optionally written to a MIDI file.
//!
//! ```text
//! cargo run --example transcribe --features serde -- pitch_track.json [notes.mid]
//! ```

use std::env;
use std::fs;

use micro_notes::{notes_to_midi, FrameClassifier, MidiExportOptions, NoteConverter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <pitch_track.json> [output.mid]", args[0]);
        std::process::exit(1);
    }

    let json = fs::read_to_string(&args[1])?;
    let estimates: Vec<(f32, f32)> = serde_json::from_str(&json)?;

    let classifier = FrameClassifier::default();
    let frames = classifier.classify(&estimates);
    let converter = NoteConverter::new(classifier.hop_duration())?;
    let notes = converter.convert(&frames);

    println!(
        "{} frames ({:.2} s), {} notes",
        frames.len(),
        frames.len() as f64 * classifier.hop_duration(),
        notes.len()
    );
    for note in notes.iter() {
        println!("{}", note);
    }

    if let Some(path) = args.get(2) {
        let bytes = notes_to_midi(&notes, &MidiExportOptions::default())?;
        fs::write(path, bytes)?;
        println!("Wrote {}", path);
    }

    Ok(())
}
