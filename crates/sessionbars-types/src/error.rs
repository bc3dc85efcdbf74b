//! Error types for sessionbars.

use thiserror::Error;

use crate::RecordStatus;

/// Result type alias for sessionbars operations.
pub type Result<T> = std::result::Result<T, SessionbarsError>;

/// Errors raised by the core types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionbarsError {
    /// Offset-adjusted timestamp does not fit a UTC instant.
    #[error("Timestamp {timestamp} with offset {offset_seconds}s is out of range")]
    TimestampOutOfRange {
        /// Raw sample timestamp in epoch seconds.
        timestamp: i64,
        /// Market UTC offset in seconds.
        offset_seconds: i32,
    },

    /// Status transition that the record lifecycle does not allow.
    #[error("Invalid status transition for record {id}: {from} -> {to}")]
    InvalidTransition {
        /// Record identifier.
        id: String,
        /// Current status.
        from: RecordStatus,
        /// Requested status.
        to: RecordStatus,
    },

    /// Unknown record status name.
    #[error(
        "invalid status '{0}', expected one of: pending, parse_error, api_error, malformed, processed"
    )]
    UnknownStatus(String),
}
