//! Common utilities.

mod f32_array_ext;
mod midi;

pub use f32_array_ext::F32ArrayExt;
pub use midi::{freq_to_midi_note, midi_note_to_freq, note_name};
