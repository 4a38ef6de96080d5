use crate::common::freq_to_midi_note;
use crate::error::ConfigError;

/// The pitch estimate for one analysis frame, as produced by an upstream
/// pitch tracker. Frames are expected in time order, one per hop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameResult {
    /// The estimated frequency in Hz. Zero or negative values carry no pitch.
    pub frequency: f32,
    /// The estimator's confidence, between 0 and 1 (inclusive).
    pub confidence: f32,
    /// The start of the frame in seconds.
    pub timestamp: f64,
    /// Whether the frame contains a discernable pitch.
    pub voiced: bool,
}

impl FrameResult {
    pub fn new(frequency: f32, confidence: f32, timestamp: f64, voiced: bool) -> Self {
        FrameResult {
            frequency,
            confidence,
            timestamp,
            voiced,
        }
    }

    /// The continuous MIDI note number of the frame's frequency, or 0 if the
    /// frequency is not positive.
    pub fn pitch(&self) -> f32 {
        freq_to_midi_note(self.frequency)
    }
}

/// Decides which raw pitch estimates are voiced, based on a confidence
/// threshold and a frequency band, and stamps each estimate with its time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClassifier {
    /// Minimum confidence for a frame to count as voiced. Default 0.9.
    confidence_threshold: f32,
    /// Lowest voiced frequency in Hz. Default 46.875.
    min_frequency: f32,
    /// Highest voiced frequency in Hz. Default 2093.75.
    max_frequency: f32,
    /// The time between consecutive estimates in seconds. Default 0.016.
    hop_duration: f64,
}

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.9;
pub const DEFAULT_MIN_FREQUENCY: f32 = 46.875;
pub const DEFAULT_MAX_FREQUENCY: f32 = 2093.75;
pub const DEFAULT_SAMPLE_RATE: f64 = 16000.0;
pub const DEFAULT_HOP_SIZE: usize = 256;
/// The reference hop duration, 256 samples at 16 kHz.
pub const DEFAULT_HOP_DURATION: f64 = DEFAULT_HOP_SIZE as f64 / DEFAULT_SAMPLE_RATE;

impl Default for FrameClassifier {
    fn default() -> Self {
        FrameClassifier {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            max_frequency: DEFAULT_MAX_FREQUENCY,
            hop_duration: DEFAULT_HOP_DURATION,
        }
    }
}

impl FrameClassifier {
    pub fn new(hop_duration: f64) -> Result<Self, ConfigError> {
        FrameClassifier::from_options(
            hop_duration,
            DEFAULT_CONFIDENCE_THRESHOLD,
            DEFAULT_MIN_FREQUENCY,
            DEFAULT_MAX_FREQUENCY,
        )
    }

    /// Creates a classifier whose hop duration is `hop_size / sample_rate`.
    pub fn from_hop_size(sample_rate: f64, hop_size: usize) -> Result<Self, ConfigError> {
        ConfigError::check_positive("sample_rate", sample_rate)?;
        FrameClassifier::new(hop_size as f64 / sample_rate)
    }

    pub fn from_options(
        hop_duration: f64,
        confidence_threshold: f32,
        min_frequency: f32,
        max_frequency: f32,
    ) -> Result<Self, ConfigError> {
        ConfigError::check_positive("hop_duration", hop_duration)?;
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(ConfigError::OutOfRange {
                name: "confidence_threshold",
                value: confidence_threshold as f64,
                min: 0.0,
                max: 1.0,
            });
        }
        ConfigError::check_positive("min_frequency", min_frequency as f64)?;
        ConfigError::check_positive("max_frequency", max_frequency as f64)?;
        if min_frequency >= max_frequency {
            return Err(ConfigError::InvalidRange {
                lower: "min_frequency",
                lower_value: min_frequency as f64,
                upper: "max_frequency",
                upper_value: max_frequency as f64,
            });
        }

        Ok(FrameClassifier {
            confidence_threshold,
            min_frequency,
            max_frequency,
            hop_duration,
        })
    }

    /// Returns true if an estimate with the given frequency and confidence is voiced.
    pub fn is_voiced(&self, frequency: f32, confidence: f32) -> bool {
        confidence >= self.confidence_threshold
            && frequency >= self.min_frequency
            && frequency <= self.max_frequency
    }

    /// Classifies a single estimate at frame `index`.
    pub fn classify_frame(&self, index: usize, frequency: f32, confidence: f32) -> FrameResult {
        FrameResult {
            frequency,
            confidence,
            timestamp: index as f64 * self.hop_duration,
            voiced: self.is_voiced(frequency, confidence),
        }
    }

    /// Classifies a sequence of `(frequency, confidence)` estimates, one per hop.
    pub fn classify(&self, estimates: &[(f32, f32)]) -> Vec<FrameResult> {
        estimates
            .iter()
            .enumerate()
            .map(|(index, &(frequency, confidence))| self.classify_frame(index, frequency, confidence))
            .collect()
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    pub fn min_frequency(&self) -> f32 {
        self.min_frequency
    }

    pub fn max_frequency(&self) -> f32 {
        self.max_frequency
    }

    /// Returns the time between consecutive frames in seconds.
    pub fn hop_duration(&self) -> f64 {
        self.hop_duration
    }
}
