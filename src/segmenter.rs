use log::trace;

use crate::common::F32ArrayExt;
use crate::frame::FrameResult;

/// A run of time-adjacent voiced frames, possibly bridging short unvoiced
/// gaps, that is a candidate for becoming a note.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment {
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds. Never less than `start_time`.
    pub end_time: f64,
    /// The pitch of each voiced frame in the segment, in frame order.
    /// Unvoiced frames bridged by the segment contribute no samples.
    pub pitch_samples: Vec<f32>,
}

impl Segment {
    fn new(start_time: f64, frame_duration: f64, pitch: f32) -> Self {
        Segment {
            start_time,
            end_time: start_time + frame_duration,
            pitch_samples: vec![pitch],
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn median_pitch(&self) -> f32 {
        self.pitch_samples.median()
    }
}

/// Groups frames into segments in a single pass. At most one segment is open
/// at a time; it is closed when an unvoiced gap reaches the grace period,
/// when a voiced frame jumps away from the segment's median pitch, or when
/// the input ends.
pub(crate) struct Segmenter {
    frame_duration: f64,
    unvoiced_grace_period: f64,
    semitone_threshold: f32,
}

impl Segmenter {
    pub fn new(frame_duration: f64, unvoiced_grace_period: f64, semitone_threshold: f32) -> Self {
        Segmenter {
            frame_duration,
            unvoiced_grace_period,
            semitone_threshold,
        }
    }

    /// Splits `frames` into time ordered, non-overlapping segments. Frame `i`
    /// is taken to start at `i * frame_duration`.
    pub fn segment(&self, frames: &[FrameResult]) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut open: Option<Segment> = None;
        // The number of consecutive unvoiced frames since the last voiced one.
        let mut unvoiced_count: usize = 0;

        for (index, frame) in frames.iter().enumerate() {
            let time = index as f64 * self.frame_duration;
            open = match (open.take(), frame.voiced) {
                (None, true) => {
                    unvoiced_count = 0;
                    Some(Segment::new(time, self.frame_duration, frame.pitch()))
                }
                (Some(mut segment), true) => {
                    unvoiced_count = 0;
                    let pitch = frame.pitch();
                    let median = segment.median_pitch();
                    if (median - pitch).abs() > self.semitone_threshold {
                        trace!(
                            "Pitch jump at frame {} ({:.2} -> {:.2}), closing segment at {:.3} s",
                            index,
                            median,
                            pitch,
                            segment.start_time
                        );
                        segments.push(segment);
                        // The frame that triggered the split starts the next segment.
                        Some(Segment::new(time, self.frame_duration, pitch))
                    } else {
                        segment.pitch_samples.push(pitch);
                        segment.end_time = time + self.frame_duration;
                        Some(segment)
                    }
                }
                (Some(mut segment), false) => {
                    unvoiced_count += 1;
                    if unvoiced_count as f64 * self.frame_duration >= self.unvoiced_grace_period {
                        trace!(
                            "Unvoiced gap at frame {}, closing segment at {:.3} s",
                            index,
                            segment.start_time
                        );
                        segments.push(segment);
                        unvoiced_count = 0;
                        None
                    } else {
                        // Bridge the gap, but don't let it affect the pitch.
                        segment.end_time = time + self.frame_duration;
                        Some(segment)
                    }
                }
                (None, false) => None,
            };
        }

        if let Some(segment) = open {
            trace!("End of input, closing segment at {:.3} s", segment.start_time);
            segments.push(segment);
        }

        segments
    }
}
