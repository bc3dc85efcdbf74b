//! One-minute OHLCV bars and the vendor samples they are built from.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, SessionbarsError};

/// A single per-minute sample as delivered by the vendor.
///
/// The vendor reports `null` for minutes without trades, so every price
/// and the volume are optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Raw sample timestamp in epoch seconds (not offset-adjusted).
    pub timestamp: i64,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price.
    pub high: Option<f64>,
    /// Lowest price.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<f64>,
}

impl Sample {
    /// Creates a sample with every value present.
    #[must_use]
    pub const fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

/// One-minute OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Market identifier.
    pub market: String,
    /// Instrument code within the market.
    pub code: String,
    /// Bar start (offset-adjusted).
    pub start: DateTime<Utc>,
    /// Bar end, always `start` plus one minute.
    pub end: DateTime<Utc>,
    /// Opening price.
    pub open: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Highest price.
    pub high: Option<f64>,
    /// Lowest price.
    pub low: Option<f64>,
    /// Traded volume.
    pub volume: Option<f64>,
}

impl Bar {
    /// Bar length in seconds.
    pub const DURATION_SECONDS: i64 = 60;

    /// Returns the bar length.
    #[must_use]
    pub fn duration() -> TimeDelta {
        TimeDelta::seconds(Self::DURATION_SECONDS)
    }

    /// Builds a bar from a vendor sample.
    ///
    /// The bar start is the raw sample timestamp shifted by the market's
    /// UTC offset.
    ///
    /// # Errors
    ///
    /// Returns [`SessionbarsError::TimestampOutOfRange`] if the shifted
    /// timestamp cannot be represented.
    pub fn from_sample(
        market: impl Into<String>,
        code: impl Into<String>,
        utc_offset_seconds: i32,
        sample: &Sample,
    ) -> Result<Self> {
        let out_of_range = || SessionbarsError::TimestampOutOfRange {
            timestamp: sample.timestamp,
            offset_seconds: utc_offset_seconds,
        };

        let start = sample
            .timestamp
            .checked_add(i64::from(utc_offset_seconds))
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(out_of_range)?;
        let end = start
            .checked_add_signed(Self::duration())
            .ok_or_else(out_of_range)?;

        Ok(Self {
            market: market.into(),
            code: code.into(),
            start,
            end,
            open: sample.open,
            close: sample.close,
            high: sample.high,
            low: sample.low,
            volume: sample.volume,
        })
    }

    /// Returns the bar start in milliseconds since the epoch.
    #[must_use]
    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// Returns the bar end in milliseconds since the epoch.
    #[must_use]
    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}
