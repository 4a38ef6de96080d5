use log::{debug, warn};

use crate::config::SegmenterConfig;
use crate::error::ConfigError;
use crate::frame::FrameResult;
use crate::note::{merge_notes, segments_to_notes, Note};
use crate::segmenter::Segmenter;

/// Converts sequences of frame results into notes.
///
/// Conversion runs three passes over the input:
/// 1. Voiced frames are grouped into segments, bridging unvoiced gaps shorter
///    than the grace period and splitting on pitch jumps.
/// 2. Segments shorter than the minimum note duration are discarded, and each
///    remaining segment becomes a note with its rounded median pitch.
/// 3. Notes of equal pitch separated by at most one frame are merged.
///
/// A converter holds no state between calls and can be reused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteConverter {
    /// The time between consecutive frames in seconds.
    frame_duration: f64,
    config: SegmenterConfig,
}

impl NoteConverter {
    /// Creates a converter for frames spaced `frame_duration` seconds apart,
    /// using the default segmentation parameters.
    pub fn new(frame_duration: f64) -> Result<Self, ConfigError> {
        NoteConverter::from_options(frame_duration, SegmenterConfig::default())
    }

    pub fn from_options(frame_duration: f64, config: SegmenterConfig) -> Result<Self, ConfigError> {
        ConfigError::check_positive("frame_duration", frame_duration)?;
        config.validate()?;
        Ok(NoteConverter {
            frame_duration,
            config,
        })
    }

    /// Converts `frames` into a time ordered list of non-overlapping notes.
    /// Frame `i` is taken to start at `i * frame_duration`, regardless
    /// of its `timestamp`.
    pub fn convert(&self, frames: &[FrameResult]) -> Vec<Note> {
        self.check_timestamps(frames);

        let segmenter = Segmenter::new(
            self.frame_duration,
            self.config.unvoiced_grace_period,
            self.config.semitone_threshold,
        );
        let segments = segmenter.segment(frames);
        let notes = segments_to_notes(&segments, self.config.min_note_duration);
        let merged = merge_notes(&notes, self.frame_duration);

        debug!(
            "Converted {} frames into {} segments, {} notes, {} after merging",
            frames.len(),
            segments.len(),
            notes.len(),
            merged.len()
        );

        merged
    }

    /// Returns the time between consecutive frames in seconds.
    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Warns once if frame timestamps drift from the frame grid by more than half a frame,
    /// which usually means the frame duration does not match the pitch tracker's hop size.
    fn check_timestamps(&self, frames: &[FrameResult]) {
        let tolerance = 0.5 * self.frame_duration;
        let drifting = frames
            .iter()
            .enumerate()
            .find(|(index, frame)| (frame.timestamp - *index as f64 * self.frame_duration).abs() > tolerance);
        if let Some((index, frame)) = drifting {
            warn!(
                "Frame {} has timestamp {:.3} s, expected {:.3} s. Is the frame duration ({} s) correct?",
                index,
                frame.timestamp,
                index as f64 * self.frame_duration,
                self.frame_duration
            );
        }
    }
}

/// Converts `frames`, spaced `frame_duration` seconds apart, into notes.
/// Shorthand for [`NoteConverter::from_options`] followed by [`NoteConverter::convert`].
pub fn convert(
    frames: &[FrameResult],
    frame_duration: f64,
    config: &SegmenterConfig,
) -> Result<Vec<Note>, ConfigError> {
    Ok(NoteConverter::from_options(frame_duration, *config)?.convert(frames))
}
