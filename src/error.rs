//! Error types.

/// Rejected configuration. Returned when constructing a converter,
/// a frame classifier or when validating options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A parameter that must be finite and positive was not.
    #[error("invalid value {value} for `{name}`, expected a finite number greater than 0")]
    InvalidParameter { name: &'static str, value: f64 },
    /// A parameter fell outside its allowed closed range.
    #[error("invalid value {value} for `{name}`, expected a value in [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A lower bound was not below its upper bound.
    #[error("`{lower}` ({lower_value}) must be less than `{upper}` ({upper_value})")]
    InvalidRange {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },
}

impl ConfigError {
    /// Fails with [`ConfigError::InvalidParameter`] unless `value` is finite and > 0.
    pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter { name, value })
        }
    }
}

/// Failure while writing notes to a Standard MIDI File.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid MIDI export options: {0}")]
    InvalidOptions(String),
    #[error("failed to write MIDI data: {0}")]
    Write(#[from] std::io::Error),
}
