//! Error types for driver operations.

use sessionbars_store::StoreError;
use sessionbars_types::{RecordStatus, SessionbarsError};
use thiserror::Error;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors that abort a driver operation before any record is touched.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The selected market is not configured.
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    /// A store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record refused a status transition.
    #[error(transparent)]
    Record(#[from] SessionbarsError),

    /// Only terminal statuses can be reset.
    #[error("Cannot reset records with non-terminal status '{0}'")]
    NotTerminal(RecordStatus),
}
