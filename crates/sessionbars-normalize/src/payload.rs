//! Vendor chart payload wire format.
//!
//! Field names follow the vendor JSON exactly. Everything the pipeline
//! validates is optional here so that missing structure surfaces as a
//! malformed payload rather than a parse failure; only syntax errors and
//! wrongly typed values fail deserialization.

use serde::Deserialize;
use serde_json::Value;

/// Top-level payload object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChartEnvelope {
    pub(crate) chart: Option<Chart>,
}

/// The `chart` object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Chart {
    pub(crate) error: Option<UpstreamError>,
    pub(crate) result: Option<Vec<Option<ChartResult>>>,
}

/// Error object the vendor sends in place of data.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamError {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    description: Value,
}

impl UpstreamError {
    /// Returns the error code as text.
    pub(crate) fn code(&self) -> String {
        value_text(&self.code)
    }

    /// Returns the error description as text.
    pub(crate) fn description(&self) -> String {
        value_text(&self.description)
    }
}

/// One entry of `chart.result`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChartResult {
    pub(crate) timestamp: Option<Vec<i64>>,
    pub(crate) indicators: Option<Indicators>,
    pub(crate) meta: Option<Meta>,
}

/// The `indicators` object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Indicators {
    pub(crate) quote: Option<Vec<Option<QuoteSeries>>>,
}

/// Parallel OHLCV arrays, one value per timestamp.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct QuoteSeries {
    pub(crate) open: Option<Vec<Option<f64>>>,
    pub(crate) close: Option<Vec<Option<f64>>>,
    pub(crate) high: Option<Vec<Option<f64>>>,
    pub(crate) low: Option<Vec<Option<f64>>>,
    pub(crate) volume: Option<Vec<Option<f64>>>,
}

/// The `meta` object; only trading periods are consumed.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Meta {
    #[serde(rename = "tradingPeriods")]
    pub(crate) trading_periods: Option<TradingPeriods>,
}

/// `meta.tradingPeriods`.
///
/// Day charts carry one object with session keys. Other chart ranges use
/// a bare nested array, which has no session breakdown.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TradingPeriods {
    Sessions(SessionPeriods),
    Other(Value),
}

/// Session keyed trading periods, each nested as `[[window]]`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionPeriods {
    pub(crate) pre: Option<Vec<Vec<WindowBounds>>>,
    pub(crate) regular: Option<Vec<Vec<WindowBounds>>>,
    pub(crate) post: Option<Vec<Vec<WindowBounds>>>,
}

/// A `{start, end}` window in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct WindowBounds {
    pub(crate) start: i64,
    pub(crate) end: i64,
}

/// Deserializes a raw payload.
///
/// This is plain data deserialization; nothing in the payload is
/// evaluated.
pub(crate) fn parse_payload(payload: &str) -> Result<ChartEnvelope, serde_json::Error> {
    serde_json::from_str(payload)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
