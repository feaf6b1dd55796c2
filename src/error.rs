use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}` does not hold a number: {text:?}")]
pub struct ParameterParseError {
    pub field: &'static str,
    pub text: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelationError {
    #[error("Invalid input for {quantity}: {text:?}")]
    InvalidNumber { quantity: &'static str, text: String },

    #[error("Cannot compute {target}: {divisor} is zero")]
    DivisionByZero {
        target: &'static str,
        divisor: &'static str,
    },

    #[error("Cannot compute {target}: result is not finite")]
    NonFinite { target: &'static str },

    #[error("Not enough known quantities to derive anything")]
    Insufficient,
}

pub type Result<T> = std::result::Result<T, RelationError>;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No default audio input device found")]
    NoInputDevice,

    #[error("No default audio output device found")]
    NoOutputDevice,

    #[error("Unsupported sample format from audio device: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read default {direction} config: {source}")]
    DefaultConfig {
        direction: &'static str,
        #[source]
        source: cpal::DefaultStreamConfigError,
    },

    #[error("Failed to build {direction} stream: {source}")]
    BuildStream {
        direction: &'static str,
        #[source]
        source: cpal::BuildStreamError,
    },

    #[error("Failed to start {direction} stream: {source}")]
    PlayStream {
        direction: &'static str,
        #[source]
        source: cpal::PlayStreamError,
    },
}

impl RelationError {
    pub fn division_by_zero(target: &'static str, divisor: &'static str) -> Self {
        Self::DivisionByZero { target, divisor }
    }
}
