//! Turns the output of a monophonic [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) tracker,
//! one frequency and confidence estimate per analysis frame, into a short list of notes
//! with an onset time, a duration and a [MIDI note number](https://newt.phys.unsw.edu.au/jw/notes.html).
//!
//! Conversion runs in three passes:
//! * Voiced frames are grouped into segments. Unvoiced gaps shorter than a grace period
//! are bridged, and a frame deviating from the segment's running median pitch by more
//! than a threshold starts a new segment.
//! * Segments shorter than a minimum duration are discarded. Each remaining segment
//! becomes a note whose pitch is the segment's median pitch, rounded to the nearest
//! note number.
//! * Consecutive notes of the same pitch separated by at most one frame are merged.
//!
//! Pitch estimation itself is not part of this crate. Any tracker producing frequency and
//! confidence estimates at a fixed hop size can be used.
//!
//! # Examples
//!
//! ```
//! use micro_notes::{FrameClassifier, NoteConverter};
//!
//! // Raw (frequency, confidence) estimates, one every 256 samples at 16 kHz.
//! let mut estimates = vec![(440.0, 0.95); 20];
//! estimates.extend(vec![(0.0, 0.1); 10]);
//! estimates.extend(vec![(523.25, 0.97); 20]);
//!
//! // Decide which frames are voiced and stamp them with their time.
//! let classifier = FrameClassifier::from_hop_size(16000.0, 256).unwrap();
//! let frames = classifier.classify(&estimates);
//!
//! // Group the frames into notes.
//! let converter = NoteConverter::new(classifier.hop_duration()).unwrap();
//! let notes = converter.convert(&frames);
//!
//! assert_eq!(notes.len(), 2);
//! assert_eq!(notes[0].pitch, 69); // A4
//! assert_eq!(notes[1].pitch, 72); // C5
//! for note in notes.iter() {
//!     println!("{}", note);
//! }
//! ```
//!
//! Notes can be written to a Standard MIDI File using [`notes_to_midi`].
//!
//! # Timing
//! The time of frame `i` is `i * frame_duration`. The frame duration must match the
//! hop size of the pitch tracker, and is passed explicitly to the converter. The
//! `timestamp` of each frame is not used for timing, but a warning is logged
//! if timestamps drift away from the frame grid.
//!
//! # Logging
//! Diagnostics are emitted through the [log](https://docs.rs/log) facade. The crate never
//! installs a logger.

pub mod common;
mod config;
mod converter;
mod error;
mod frame;
pub mod midi;
mod note;
mod segmenter;

pub use config::SegmenterConfig;
pub use converter::{convert, NoteConverter};
pub use error::{ConfigError, ExportError};
pub use frame::{
    FrameClassifier, FrameResult, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HOP_DURATION, DEFAULT_HOP_SIZE,
    DEFAULT_MAX_FREQUENCY, DEFAULT_MIN_FREQUENCY, DEFAULT_SAMPLE_RATE,
};
pub use midi::{notes_to_midi, MidiExportOptions};
pub use note::Note;
