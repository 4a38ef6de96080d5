//! Standard MIDI File export.

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use crate::error::ExportError;
use crate::note::{Note, MAX_NOTE_NUMBER};

/// The largest delta time, in ticks, a MIDI event can carry.
const MAX_DELTA_TICKS: u64 = 0x0FFF_FFFF;
const MAX_TICKS_PER_BEAT: u16 = 0x7FFF;
const MAX_CHANNEL: u8 = 15;
/// The largest tempo, in microseconds per quarter note, a tempo event can carry.
const MAX_TEMPO: u32 = 0xFF_FFFF;

/// Options for MIDI export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MidiExportOptions {
    /// Tempo used to convert seconds to ticks. Default: 120.
    pub bpm: f64,
    /// Ticks per quarter note. Default: 480.
    pub ticks_per_beat: u16,
    /// Note-on velocity, 1-127. Default: 80.
    pub velocity: u8,
    /// MIDI channel, 0-15. Default: 0.
    pub channel: u8,
    /// Name of the note track. Default: "notes".
    pub track_name: String,
}

impl Default for MidiExportOptions {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            ticks_per_beat: 480,
            velocity: 80,
            channel: 0,
            track_name: "notes".to_string(),
        }
    }
}

impl MidiExportOptions {
    fn validate(&self) -> Result<(), ExportError> {
        if !(self.bpm.is_finite() && self.bpm > 0.0) {
            return Err(ExportError::InvalidOptions(format!("bpm must be positive, got {}", self.bpm)));
        }
        let tempo = (60_000_000.0 / self.bpm).round();
        if !(1.0..=MAX_TEMPO as f64).contains(&tempo) {
            return Err(ExportError::InvalidOptions(format!(
                "bpm {} gives a tempo of {} microseconds per beat, expected 1..={}",
                self.bpm, tempo, MAX_TEMPO
            )));
        }
        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_TICKS_PER_BEAT {
            return Err(ExportError::InvalidOptions(format!(
                "ticks_per_beat must be in 1..={}, got {}",
                MAX_TICKS_PER_BEAT, self.ticks_per_beat
            )));
        }
        if self.velocity == 0 || self.velocity > MAX_NOTE_NUMBER {
            return Err(ExportError::InvalidOptions(format!(
                "velocity must be in 1..=127, got {}",
                self.velocity
            )));
        }
        if self.channel > MAX_CHANNEL {
            return Err(ExportError::InvalidOptions(format!(
                "channel must be in 0..=15, got {}",
                self.channel
            )));
        }
        Ok(())
    }

    /// Converts a time in seconds to ticks at the configured tempo.
    fn seconds_to_ticks(&self, seconds: f64) -> u64 {
        let beats = seconds * self.bpm / 60.0;
        (beats * self.ticks_per_beat as f64).round().max(0.0) as u64
    }

    /// Microseconds per quarter note. Only valid after `validate`.
    fn tempo(&self) -> u32 {
        (60_000_000.0 / self.bpm).round() as u32
    }
}

/// Writes notes to single track (format 0) Standard MIDI File bytes.
///
/// The track starts with the track name and tempo, followed by a
/// note-on/note-off pair per note. Notes must be in time order and must
/// not overlap, as returned by [`crate::NoteConverter::convert`].
pub fn notes_to_midi(notes: &[Note], options: &MidiExportOptions) -> Result<Vec<u8>, ExportError> {
    options.validate()?;

    // (tick, is_note_on, event). Note offs sort before note ons at the same tick
    // so back to back notes of the same pitch don't cancel each other.
    let mut events: Vec<(u64, bool, TrackEventKind)> = Vec::with_capacity(2 * notes.len());
    for note in notes.iter() {
        let start_tick = options.seconds_to_ticks(note.position);
        let end_tick = options.seconds_to_ticks(note.end()).max(start_tick.saturating_add(1));
        let key = note.pitch.min(MAX_NOTE_NUMBER);
        events.push((
            start_tick,
            true,
            TrackEventKind::Midi {
                channel: options.channel.into(),
                message: MidiMessage::NoteOn {
                    key: key.into(),
                    vel: options.velocity.into(),
                },
            },
        ));
        events.push((
            end_tick,
            false,
            TrackEventKind::Midi {
                channel: options.channel.into(),
                message: MidiMessage::NoteOff {
                    key: key.into(),
                    vel: 0u8.into(),
                },
            },
        ));
    }
    events.sort_by_key(|(tick, is_note_on, _)| (*tick, *is_note_on));

    let mut track: Vec<TrackEvent> = Vec::with_capacity(events.len() + 3);
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(options.track_name.as_bytes())),
    });
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(options.tempo().into())),
    });

    let mut last_tick = 0u64;
    for (tick, _, kind) in events {
        let delta = tick - last_tick;
        if delta > MAX_DELTA_TICKS {
            return Err(ExportError::InvalidOptions(format!(
                "gap of {} ticks exceeds the maximum MIDI delta time",
                delta
            )));
        }
        track.push(TrackEvent {
            delta: (delta as u32).into(),
            kind,
        });
        last_tick = tick;
    }
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(options.ticks_per_beat.into())),
        tracks: vec![track],
    };

    let mut buffer = Vec::new();
    smf.write_std(&mut buffer)?;
    Ok(buffer)
}
