//! Error types for itinerary-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItineraryError {
    #[error("Invalid time format: {0:?} (expected HH:mm)")]
    InvalidTimeFormat(String),

    #[error("Invalid time ordering: end time {end} must be after start time {start}")]
    InvalidTimeOrdering { start: String, end: String },

    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid default duration: {0} minutes (expected 1 to 1439)")]
    InvalidDuration(i64),
}

pub type Result<T> = std::result::Result<T, ItineraryError>;
