//! Error types for studylog-core

use thiserror::Error;

/// Main error type for the studylog-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error in the session log
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Rejected input while recording a new session
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// Validation failures for a session entered through the appender.
///
/// None of these leave the session log modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// Date is not a real `YYYY-MM-DD` calendar date
    #[error("invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    /// Date lies after the reference day
    #[error("cannot add study sessions for future dates ({0})")]
    FutureDate(String),

    /// Topic was blank
    #[error("topic is required")]
    EmptyTopic,

    /// Time is not a valid `HH:MM` value
    #[error("invalid time '{0}': use HH:MM")]
    InvalidTime(String),

    /// Minutes value could not be parsed as a positive integer
    #[error("invalid minutes '{0}': enter a whole number greater than zero")]
    InvalidMinutes(String),

    /// Start/end pair yields no study time
    #[error("end time must be after start time, resulting in positive duration")]
    NonPositiveDuration,
}

/// Result type alias for studylog-core
pub type Result<T> = std::result::Result<T, Error>;
