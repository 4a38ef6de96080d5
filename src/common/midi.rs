/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI) note number
/// (with a fractional part), using A4 = 440 Hz = note 69. Returns 0 for
/// frequencies that are not positive.
pub fn freq_to_midi_note(freq: f32) -> f32 {
    if freq <= 0.0 {
        return 0.0;
    }
    69.0 + 12.0 * (freq / 440.0).log2()
}

/// Converts a (possibly fractional) MIDI note number to a frequency in Hz.
pub fn midi_note_to_freq(note_number: f32) -> f32 {
    440.0 * 2.0_f32.powf((note_number - 69.0) / 12.0)
}

/// Returns the name of a MIDI note in scientific pitch notation,
/// for example `A4` for note 69 and `C-1` for note 0.
pub fn note_name(note_number: u8) -> String {
    let note_names = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = (note_number / 12) as i32 - 1;
    format!("{}{}", note_names[(note_number % 12) as usize], octave)
}
