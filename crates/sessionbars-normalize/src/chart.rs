//! Structural validation and flattening of a parsed chart.

use sessionbars_types::{Sample, SessionWindows, TradingWindow};

use crate::payload::{ChartEnvelope, QuoteSeries, SessionPeriods, TradingPeriods, WindowBounds};

/// Why a parsed payload lacks the structure needed for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedReason {
    /// No `chart` object.
    MissingChart,
    /// `chart.result[0]` is absent or null.
    MissingResult,
    /// `chart.result[0].timestamp` is absent or null.
    MissingTimestamps,
    /// `indicators.quote[0]` is absent or null.
    MissingQuote,
    /// `meta.tradingPeriods` is absent or has no session breakdown.
    MissingTradingPeriods,
    /// `tradingPeriods.regular[0][0]` is absent.
    MissingRegularWindow,
    /// A sample timestamp cannot be represented once offset-adjusted.
    TimestampOutOfRange,
}

impl MalformedReason {
    /// Returns a short description of the missing structure.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingChart => "missing chart",
            Self::MissingResult => "missing chart.result[0]",
            Self::MissingTimestamps => "missing chart.result[0].timestamp",
            Self::MissingQuote => "missing indicators.quote[0]",
            Self::MissingTradingPeriods => "missing meta.tradingPeriods",
            Self::MissingRegularWindow => "missing tradingPeriods.regular[0][0]",
            Self::TimestampOutOfRange => "timestamp out of range",
        }
    }
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flattened chart: one sample per timestamp and one window per session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedChart {
    pub(crate) samples: Vec<Sample>,
    pub(crate) windows: SessionWindows,
}

/// Result of inspecting a parsed payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Inspection {
    /// The vendor returned an error object.
    Upstream { code: String, description: String },
    /// Required structure is missing.
    Malformed(MalformedReason),
    /// Ready for classification.
    Valid(ValidatedChart),
}

/// Checks a parsed payload for an upstream error, then for structure.
///
/// The upstream error check runs first, so an error object wins over a
/// missing or partial result.
pub(crate) fn inspect(envelope: ChartEnvelope) -> Inspection {
    let Some(chart) = envelope.chart else {
        return Inspection::Malformed(MalformedReason::MissingChart);
    };

    if let Some(error) = &chart.error {
        return Inspection::Upstream {
            code: error.code(),
            description: error.description(),
        };
    }

    match validate(chart.result) {
        Ok(valid) => Inspection::Valid(valid),
        Err(reason) => Inspection::Malformed(reason),
    }
}

fn validate(
    result: Option<Vec<Option<crate::payload::ChartResult>>>,
) -> Result<ValidatedChart, MalformedReason> {
    let first = result
        .and_then(|results| results.into_iter().next())
        .flatten()
        .ok_or(MalformedReason::MissingResult)?;

    let timestamps = first.timestamp.ok_or(MalformedReason::MissingTimestamps)?;

    let periods = match first.meta.and_then(|meta| meta.trading_periods) {
        Some(TradingPeriods::Sessions(periods)) => periods,
        Some(TradingPeriods::Other(_)) | None => {
            return Err(MalformedReason::MissingTradingPeriods);
        }
    };
    let windows = session_windows(periods)?;

    let quote = first
        .indicators
        .and_then(|indicators| indicators.quote)
        .and_then(|quotes| quotes.into_iter().next())
        .flatten()
        .ok_or(MalformedReason::MissingQuote)?;

    Ok(ValidatedChart {
        samples: flatten_samples(&timestamps, quote),
        windows,
    })
}

fn session_windows(periods: SessionPeriods) -> Result<SessionWindows, MalformedReason> {
    let regular =
        first_window(periods.regular).ok_or(MalformedReason::MissingRegularWindow)?;
    Ok(SessionWindows::new(
        first_window(periods.pre),
        regular,
        first_window(periods.post),
    ))
}

/// Unwraps the vendor's `[[window]]` nesting.
fn first_window(nested: Option<Vec<Vec<WindowBounds>>>) -> Option<TradingWindow> {
    let bounds = nested?.into_iter().next()?.into_iter().next()?;
    Some(TradingWindow::new(bounds.start, bounds.end))
}

/// Zips the timestamp sequence with the parallel OHLCV arrays.
///
/// A value missing from a shorter array is treated like a vendor `null`.
fn flatten_samples(timestamps: &[i64], quote: QuoteSeries) -> Vec<Sample> {
    let open = quote.open.unwrap_or_default();
    let high = quote.high.unwrap_or_default();
    let low = quote.low.unwrap_or_default();
    let close = quote.close.unwrap_or_default();
    let volume = quote.volume.unwrap_or_default();

    let at = |values: &[Option<f64>], index: usize| values.get(index).copied().flatten();

    timestamps
        .iter()
        .enumerate()
        .map(|(index, &timestamp)| Sample {
            timestamp,
            open: at(&open, index),
            high: at(&high, index),
            low: at(&low, index),
            close: at(&close, index),
            volume: at(&volume, index),
        })
        .collect()
}
