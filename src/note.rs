use core::fmt;

use log::debug;

use crate::common::{midi_note_to_freq, note_name};
use crate::segmenter::Segment;

/// The highest representable MIDI note number.
pub const MAX_NOTE_NUMBER: u8 = 127;

/// Slack added to the merge distance to absorb floating point rounding.
const MERGE_EPSILON: f64 = 1e-9;

/// A note with a quantized pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// The onset time in seconds.
    pub position: f64,
    /// The [MIDI note number](https://newt.phys.unsw.edu.au/jw/notes.html), between 0 and 127 (inclusive).
    pub pitch: u8,
    /// The duration in seconds. Always greater than 0.
    pub duration: f64,
}

impl Note {
    pub fn new(position: f64, pitch: u8, duration: f64) -> Self {
        Note {
            position,
            pitch,
            duration,
        }
    }

    /// The time in seconds at which the note ends.
    pub fn end(&self) -> f64 {
        self.position + self.duration
    }

    /// The frequency in Hz of the note's pitch.
    pub fn frequency(&self) -> f32 {
        midi_note_to_freq(self.pitch as f32)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} ({:3}) at {:.3} s for {:.3} s",
            note_name(self.pitch),
            self.pitch,
            self.position,
            self.duration
        )
    }
}

/// Rounds a continuous pitch to the nearest note number, clamping
/// it to the representable range.
pub(crate) fn quantize_pitch(pitch: f32) -> u8 {
    let rounded = pitch.round();
    if rounded < 0.0 || rounded > MAX_NOTE_NUMBER as f32 {
        debug!("Clamping out of range pitch {:.2}", pitch);
    }
    rounded.max(0.0).min(MAX_NOTE_NUMBER as f32) as u8
}

/// Turns segments into notes, discarding segments shorter than `min_note_duration`.
/// The pitch of each note is the rounded median pitch of its segment.
pub(crate) fn segments_to_notes(segments: &[Segment], min_note_duration: f64) -> Vec<Note> {
    segments
        .iter()
        .filter(|segment| segment.duration() >= min_note_duration)
        .map(|segment| Note {
            position: segment.start_time,
            pitch: quantize_pitch(segment.median_pitch()),
            duration: segment.duration(),
        })
        .collect()
}

/// Merges each note into its predecessor if both have the same pitch and
/// the gap between them is at most `frame_duration`. A merged note spans from
/// the onset of the first note to the end of the last one. `notes` must be
/// in time order.
pub(crate) fn merge_notes(notes: &[Note], frame_duration: f64) -> Vec<Note> {
    let mut merged: Vec<Note> = Vec::with_capacity(notes.len());
    for note in notes.iter() {
        match merged.last_mut() {
            Some(last)
                if last.pitch == note.pitch
                    && note.position - last.end() <= frame_duration + MERGE_EPSILON =>
            {
                last.duration = note.end() - last.position;
            }
            _ => merged.push(*note),
        }
    }
    merged
}
