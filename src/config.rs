//! Segmentation parameters.

use crate::error::ConfigError;

/// Parameters controlling how frames are grouped into notes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmenterConfig {
    /// The longest run of unvoiced frames, in seconds, that does not
    /// end the current note (default: 0.02)
    pub unvoiced_grace_period: f64,
    /// Notes shorter than this, in seconds, are discarded (default: 0.05)
    pub min_note_duration: f64,
    /// A frame deviating from the running median pitch of the current note by more than
    /// this many semitones starts a new note (default: 0.8)
    pub semitone_threshold: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            unvoiced_grace_period: 0.02,
            min_note_duration: 0.05,
            semitone_threshold: 0.8,
        }
    }
}

impl SegmenterConfig {
    /// Checks that every parameter is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("unvoiced_grace_period", self.unvoiced_grace_period)?;
        ConfigError::check_positive("min_note_duration", self.min_note_duration)?;
        ConfigError::check_positive("semitone_threshold", self.semitone_threshold as f64)?;
        Ok(())
    }
}
