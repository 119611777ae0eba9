//! Validation errors raised when campaigns or view inputs are ingested.

use chrono::NaiveDate;
use thiserror::Error;

/// Caller-correctable input problems. None of these are runtime faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The campaign ends before it starts.
    #[error("campaign '{id}' ends on {end} before it starts on {start}")]
    InvertedDates {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("campaign '{id}' has an empty title")]
    EmptyTitle { id: String },

    #[error("campaign titled '{title}' has an empty id")]
    EmptyId { title: String },

    #[error("campaign id '{id}' is used more than once")]
    DuplicateId { id: String },

    /// Weekday indices run 0 (Sunday) through 6 (Saturday).
    #[error("weekday must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidWeekday(u8),
}
