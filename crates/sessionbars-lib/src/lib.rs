//! Normalize vendor minute payloads into session-partitioned OHLCV bars.
//!
//! This is a facade crate that re-exports functionality from the
//! sessionbars workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use sessionbars_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data_dir = DataDir::resolve(None);
//!     let driver = Driver::new(data_dir.markets()?, data_dir.record_store(), data_dir.bar_store());
//!
//!     let summary = driver.run(&Selection::market("NASDAQ").with_code("AAPL"))?;
//!     println!("{summary}");
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sessionbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use sessionbars_types::*;

// Re-export the normalizer
#[cfg(feature = "normalize")]
pub use sessionbars_normalize::{MalformedReason, Normalizer, Outcome, SessionBars, SessionClassifier};

// Re-export stores
#[cfg(feature = "store")]
pub use sessionbars_store::{
    BarStore, DataDir, FsRecordStore, JsonlBarStore, MarketConfig, MarketRegistry,
    MemoryBarStore, MemoryRecordStore, RawRecordStore, StoreError,
};

// Re-export the driver
#[cfg(feature = "driver")]
pub use sessionbars_driver::{Driver, DriverError, RunSummary, Selection, reset_records};

/// Prelude module for convenient imports.
///
/// ```
/// use sessionbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use sessionbars_types::{
        Bar, Market, RawRecord, RecordStatus, Result, Sample, Session, SessionWindows,
        SessionbarsError, TradingWindow,
    };

    #[cfg(feature = "normalize")]
    pub use sessionbars_normalize::{Normalizer, Outcome, SessionBars};

    #[cfg(feature = "store")]
    pub use sessionbars_store::{
        BarStore, DataDir, MarketConfig, MarketRegistry, MemoryBarStore, MemoryRecordStore,
        RawRecordStore,
    };

    #[cfg(feature = "driver")]
    pub use sessionbars_driver::{Driver, RunSummary, Selection, reset_records};
}
