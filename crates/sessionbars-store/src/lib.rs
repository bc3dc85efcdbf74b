//! Storage capabilities for the sessionbars normalizer.
//!
//! This crate provides:
//!
//! - [`MarketConfig`], [`RawRecordStore`], [`BarStore`] - Store traits
//! - [`MarketRegistry`] - Market lookup, in memory or from `markets.json`
//! - [`MemoryRecordStore`] / [`MemoryBarStore`] - In-memory stores
//! - [`DataDir`] - Filesystem layout of a sessionbars data directory
//! - [`FsRecordStore`] - One JSON file per raw record
//! - [`JsonlBarStore`] - Append-only JSON Lines bar files per session

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bars;
mod data_dir;
mod error;
mod memory;
mod records;
mod registry;
mod traits;

pub use bars::JsonlBarStore;
pub use data_dir::DataDir;
pub use error::{Result, StoreError};
pub use memory::{MemoryBarStore, MemoryRecordStore};
pub use records::FsRecordStore;
pub use registry::MarketRegistry;
pub use traits::{BarStore, MarketConfig, RawRecordStore};
