//! Core types for the sessionbars minute-bar normalizer.
//!
//! This crate provides the fundamental data structures used throughout sessionbars:
//!
//! - [`Market`] - Market reference data with its UTC offset
//! - [`RawRecord`] - Opaque vendor payload awaiting normalization
//! - [`RecordStatus`] - Processing status of a raw record
//! - [`Bar`] - One-minute OHLCV bar
//! - [`Session`] - Trading session (pre-market, regular, post-market)
//! - [`TradingWindow`] / [`SessionWindows`] - Half-open session windows

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod market;
mod record;
mod session;

pub use bar::{Bar, Sample};
pub use error::{Result, SessionbarsError};
pub use market::Market;
pub use record::{RawRecord, RecordId, RecordStatus};
pub use session::{Session, SessionWindows, TradingWindow};
