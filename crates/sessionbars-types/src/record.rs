//! Raw payload records and their processing status.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::{Result, SessionbarsError};

/// Storage identifier of a raw record.
pub type RecordId = String;

/// Processing status of a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Fetched but not yet normalized.
    #[default]
    Pending,
    /// Payload was not well-formed data.
    ParseError,
    /// Vendor reported an error instead of data.
    ApiError,
    /// Payload parsed but lacked the required structure.
    Malformed,
    /// Payload normalized into bars.
    Processed,
}

impl RecordStatus {
    /// Returns true if the pipeline will not touch the record again.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true for terminal statuses other than success.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::ParseError | Self::ApiError | Self::Malformed)
    }

    /// Returns the status as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ParseError => "parse_error",
            Self::ApiError => "api_error",
            Self::Malformed => "malformed",
            Self::Processed => "processed",
        }
    }

    /// Returns all statuses.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::ParseError,
            Self::ApiError,
            Self::Malformed,
            Self::Processed,
        ]
    }

    /// Returns the terminal failure statuses.
    #[must_use]
    pub const fn failures() -> &'static [Self] {
        &[Self::ParseError, Self::ApiError, Self::Malformed]
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = SessionbarsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "parse_error" => Ok(Self::ParseError),
            "api_error" => Ok(Self::ApiError),
            "malformed" => Ok(Self::Malformed),
            "processed" => Ok(Self::Processed),
            _ => Err(SessionbarsError::UnknownStatus(s.to_string())),
        }
    }
}

/// A raw vendor payload awaiting normalization.
///
/// Records are created pending by the fetcher, move to exactly one
/// terminal status per pipeline pass and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Storage identifier.
    pub id: RecordId,
    /// Market identifier.
    pub market: String,
    /// Instrument code within the market.
    pub code: String,
    /// Processing status.
    pub status: RecordStatus,
    /// Opaque serialized payload as fetched.
    pub payload: String,
    /// Failure detail for parse and upstream errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RawRecord {
    /// Creates a pending record with the given identifier.
    #[must_use]
    pub fn pending(
        id: impl Into<RecordId>,
        market: impl Into<String>,
        code: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            market: market.into(),
            code: code.into(),
            status: RecordStatus::Pending,
            payload: payload.into(),
            message: None,
        }
    }

    /// Creates a pending record with a freshly generated identifier.
    #[must_use]
    pub fn new_pending(
        market: impl Into<String>,
        code: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self::pending(Uuid::new_v4().to_string(), market, code, payload)
    }

    /// Returns true if the record still awaits normalization.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, RecordStatus::Pending)
    }

    /// Moves a pending record into a terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`SessionbarsError::InvalidTransition`] if the record is not
    /// pending or `status` is not terminal.
    pub fn complete(&mut self, status: RecordStatus, message: Option<String>) -> Result<()> {
        if !self.is_pending() || !status.is_terminal() {
            return Err(self.invalid_transition(status));
        }
        self.status = status;
        self.message = message;
        Ok(())
    }

    /// Returns a terminal record to pending and clears its message.
    ///
    /// # Errors
    ///
    /// Returns [`SessionbarsError::InvalidTransition`] if the record is
    /// already pending.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_pending() {
            return Err(self.invalid_transition(RecordStatus::Pending));
        }
        self.status = RecordStatus::Pending;
        self.message = None;
        Ok(())
    }

    fn invalid_transition(&self, to: RecordStatus) -> SessionbarsError {
        SessionbarsError::InvalidTransition {
            id: self.id.clone(),
            from: self.status,
            to,
        }
    }
}
