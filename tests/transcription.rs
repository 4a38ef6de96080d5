//! End to end tests going from raw pitch estimates to notes and MIDI.

use micro_notes::common::{freq_to_midi_note, midi_note_to_freq};
use micro_notes::{
    convert, notes_to_midi, FrameClassifier, FrameResult, MidiExportOptions, Note, NoteConverter,
    SegmenterConfig, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HOP_DURATION, DEFAULT_HOP_SIZE,
    DEFAULT_MAX_FREQUENCY, DEFAULT_MIN_FREQUENCY, DEFAULT_SAMPLE_RATE,
};

/// Generates `(frequency, confidence)` estimates for a sequence of
/// `(note number, frame count)` pairs. A note number of `None` is silence.
fn estimates(melody: &[(Option<f32>, usize)]) -> Vec<(f32, f32)> {
    let mut result = Vec::new();
    for (note_number, frame_count) in melody.iter() {
        for _ in 0..*frame_count {
            match note_number {
                Some(note_number) => result.push((midi_note_to_freq(*note_number), 0.97)),
                None => result.push((0.0, 0.02)),
            }
        }
    }
    result
}

fn transcribe(estimates: &[(f32, f32)]) -> Vec<Note> {
    let classifier = FrameClassifier::default();
    let frames = classifier.classify(estimates);
    NoteConverter::new(classifier.hop_duration())
        .unwrap()
        .convert(&frames)
}

fn assert_well_formed(notes: &[Note]) {
    for note in notes.iter() {
        assert!(note.duration > 0.0);
        assert!(note.pitch <= 127);
    }
    for pair in notes.windows(2) {
        assert!(pair[0].position < pair[1].position);
        assert!(pair[0].end() <= pair[1].position + 1e-9);
    }
}

#[test]
fn test_scale() {
    let melody: Vec<(Option<f32>, usize)> = [60.0, 62.0, 64.0, 65.0, 67.0]
        .iter()
        .flat_map(|n| vec![(Some(*n), 15), (None, 5)])
        .collect();
    let notes = transcribe(&estimates(&melody));
    assert_well_formed(&notes);
    let pitches: Vec<u8> = notes.iter().map(|note| note.pitch).collect();
    assert_eq!(pitches, vec![60, 62, 64, 65, 67]);
    for (index, note) in notes.iter().enumerate() {
        let expected_position = (20 * index) as f64 * DEFAULT_HOP_DURATION;
        assert!((note.position - expected_position).abs() < 1e-9);
        // 15 voiced frames plus one bridged unvoiced frame
        assert!((note.duration - 16.0 * DEFAULT_HOP_DURATION).abs() < 1e-9);
    }
}

#[test]
fn test_default_classifier() {
    let classifier = FrameClassifier::default();
    assert_eq!(
        FrameClassifier::from_hop_size(DEFAULT_SAMPLE_RATE, DEFAULT_HOP_SIZE).unwrap(),
        classifier
    );
    assert_eq!(classifier.confidence_threshold(), DEFAULT_CONFIDENCE_THRESHOLD);
    assert_eq!(classifier.min_frequency(), DEFAULT_MIN_FREQUENCY);
    assert_eq!(classifier.max_frequency(), DEFAULT_MAX_FREQUENCY);
    assert_eq!(classifier.hop_duration(), DEFAULT_HOP_DURATION);
    assert!(classifier.is_voiced(DEFAULT_MIN_FREQUENCY, DEFAULT_CONFIDENCE_THRESHOLD));
    assert!(classifier.is_voiced(DEFAULT_MAX_FREQUENCY, DEFAULT_CONFIDENCE_THRESHOLD));
    assert!(!classifier.is_voiced(DEFAULT_MAX_FREQUENCY + 1.0, 1.0));
}

#[test]
fn test_vibrato_stays_one_note() {
    // +-0.3 semitones of vibrato around A4
    let estimates: Vec<(f32, f32)> = (0..60)
        .map(|i| {
            let deviation = 0.3 * (i as f32 * 0.5).sin();
            (midi_note_to_freq(69.0 + deviation), 0.95)
        })
        .collect();
    let notes = transcribe(&estimates);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pitch, 69);
    assert!((notes[0].duration - 60.0 * DEFAULT_HOP_DURATION).abs() < 1e-9);
}

#[test]
fn test_dropouts_and_spurious_detections() {
    let melody = [
        (Some(64.0), 12),
        // A single unvoiced frame is bridged
        (None, 1),
        (Some(64.0), 12),
        (None, 10),
        // Too short to become a note
        (Some(80.0), 2),
        (None, 10),
        (Some(67.0), 20),
    ];
    let notes = transcribe(&estimates(&melody));
    assert_well_formed(&notes);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].pitch, 64);
    assert!((notes[0].duration - 26.0 * DEFAULT_HOP_DURATION).abs() < 1e-9);
    assert_eq!(notes[1].pitch, 67);
    assert!((notes[1].position - 47.0 * DEFAULT_HOP_DURATION).abs() < 1e-9);
}

#[test]
fn test_octave_error_is_healed() {
    // A one frame octave jump splits the note in three. The middle piece is
    // too short to keep, and the outer ones are one frame apart so they merge.
    let melody = [(Some(57.0), 10), (Some(69.0), 1), (Some(57.0), 10)];
    let notes = transcribe(&estimates(&melody));
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pitch, 57);
    assert_eq!(notes[0].position, 0.0);
    assert!((notes[0].duration - 21.0 * DEFAULT_HOP_DURATION).abs() < 1e-9);
}

#[test]
fn test_out_of_band_frames_are_unvoiced() {
    // 5 kHz is above the default voicing band
    let estimates = vec![(5000.0, 0.99); 30];
    assert!(transcribe(&estimates).is_empty());
}

#[test]
fn test_free_function_matches_converter() {
    let frames: Vec<FrameResult> = (0..40)
        .map(|i| {
            let frequency = if i < 20 { 330.0 } else { 392.0 };
            FrameResult::new(frequency, 0.9, i as f64 * 0.01, true)
        })
        .collect();
    let config = SegmenterConfig::default();
    let notes = convert(&frames, 0.01, &config).unwrap();
    let expected = NoteConverter::from_options(0.01, config)
        .unwrap()
        .convert(&frames);
    assert_eq!(notes, expected);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].pitch, freq_to_midi_note(330.0).round() as u8);
    assert_eq!(notes[1].pitch, freq_to_midi_note(392.0).round() as u8);
}

#[test]
fn test_midi_export() {
    let melody = [(Some(60.0), 31), (None, 10), (Some(72.0), 31)];
    let notes = transcribe(&estimates(&melody));
    assert_eq!(notes.len(), 2);
    let bytes = notes_to_midi(&notes, &MidiExportOptions::default()).unwrap();
    let smf = midly::Smf::parse(&bytes).unwrap();
    let keys: Vec<u8> = smf.tracks[0]
        .iter()
        .filter_map(|event| match event.kind {
            midly::TrackEventKind::Midi {
                message: midly::MidiMessage::NoteOn { key, .. },
                ..
            } => Some(key.as_int()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec![60, 72]);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_round_trip() {
    let notes = vec![Note::new(0.0, 60, 0.5), Note::new(0.512, 64, 0.25)];
    let json = serde_json::to_string(&notes).unwrap();
    let parsed: Vec<Note> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, notes);

    let config: SegmenterConfig = serde_json::from_str(r#"{"min_note_duration": 0.1}"#).unwrap();
    assert_eq!(config.min_note_duration, 0.1);
    assert_eq!(config.unvoiced_grace_period, 0.02);
}
