//! Batch driver for the sessionbars normalizer.
//!
//! - [`Driver`] - One normalization pass over a market's pending records
//! - [`Selection`] - Market and optional code filter
//! - [`RunSummary`] - Counts reported by a pass
//! - [`reset_records`] - Returns terminal records to pending

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod driver;
mod error;
mod reset;
mod selection;
mod summary;

pub use driver::Driver;
pub use error::{DriverError, Result};
pub use reset::reset_records;
pub use selection::Selection;
pub use summary::RunSummary;
