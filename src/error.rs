use thiserror::Error;

/// Rejected `HHMM` input. Never reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected exactly 4 digits as HHMM, got {0} characters")]
    WrongLength(usize),
    #[error("expected only digits as HHMM, got {0:?}")]
    NotNumeric(String),
    #[error("hour {0} is out of range, expected HHMM with HH in 00-23")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range, expected HHMM with MM in 00-59")]
    MinuteOutOfRange(u32),
}

/// A character outside `0-9` and blank reached the encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no segment pattern for digit {digit:?}")]
pub struct EncodingError {
    pub digit: char,
}

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("writing line {line} failed: {message}")]
    Line { line: usize, message: String },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid time: {0}")]
    Validation(#[from] ValidationError),
    #[error("Display error: {0}")]
    Drive(#[from] DriveError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClockError>;

// Helper conversions
impl From<config::ConfigError> for ClockError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
