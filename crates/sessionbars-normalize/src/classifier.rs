//! Streaming sample-to-session classification.

use sessionbars_types::{Bar, Result, Sample, Session, SessionWindows};
use tracing::trace;

use crate::SessionBars;

/// Streaming session classifier.
///
/// Builds one bar per sample and files it under the first session window,
/// in priority order pre, regular, post, whose half-open interval contains
/// the sample's raw timestamp. The bar itself carries the offset-adjusted
/// time. Samples outside every window are dropped and counted.
#[derive(Debug)]
pub struct SessionClassifier {
    market: String,
    code: String,
    utc_offset_seconds: i32,
    windows: SessionWindows,
    bars: SessionBars,
}

impl SessionClassifier {
    /// Creates a classifier for one market/code trading day.
    #[must_use]
    pub fn new(
        market: impl Into<String>,
        code: impl Into<String>,
        utc_offset_seconds: i32,
        windows: SessionWindows,
    ) -> Self {
        Self {
            market: market.into(),
            code: code.into(),
            utc_offset_seconds,
            windows,
            bars: SessionBars::new(),
        }
    }

    /// Classifies one sample.
    ///
    /// Returns the session the sample's bar was filed under, or `None` if
    /// the sample was dropped. A dropped sample never becomes a bar, so its
    /// timestamp is not offset.
    ///
    /// # Errors
    ///
    /// Returns an error if an in-window sample's offset-adjusted timestamp
    /// is out of range.
    pub fn process(&mut self, sample: &Sample) -> Result<Option<Session>> {
        let Some(session) = self.windows.classify(sample.timestamp) else {
            trace!(
                market = %self.market,
                code = %self.code,
                timestamp = sample.timestamp,
                "Sample outside all trading windows"
            );
            self.bars.record_dropped();
            return Ok(None);
        };

        let bar = Bar::from_sample(
            self.market.as_str(),
            self.code.as_str(),
            self.utc_offset_seconds,
            sample,
        )?;
        self.bars.push(session, bar);
        Ok(Some(session))
    }

    /// Finishes classification, returning the partitioned bars.
    #[must_use]
    pub fn finish(self) -> SessionBars {
        self.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sessionbars_types::TradingWindow;

    fn make_classifier() -> SessionClassifier {
        let windows = SessionWindows::new(
            Some(TradingWindow::new(0, 600)),
            TradingWindow::new(600, 1200),
            Some(TradingWindow::new(1200, 1800)),
        );
        SessionClassifier::new("NASDAQ", "AAPL", -14400, windows)
    }

    fn sample(timestamp: i64) -> Sample {
        Sample::new(timestamp, 1.0, 2.0, 0.5, 1.5, 100.0)
    }

    #[test]
    fn test_classify_each_session() {
        let mut classifier = make_classifier();

        assert_eq!(classifier.process(&sample(0)).unwrap(), Some(Session::Pre));
        assert_eq!(classifier.process(&sample(600)).unwrap(), Some(Session::Regular));
        assert_eq!(classifier.process(&sample(1199)).unwrap(), Some(Session::Regular));
        assert_eq!(classifier.process(&sample(1200)).unwrap(), Some(Session::Post));
        assert_eq!(classifier.process(&sample(1800)).unwrap(), None);

        let bars = classifier.finish();
        assert_eq!(bars.get(Session::Pre).len(), 1);
        assert_eq!(bars.get(Session::Regular).len(), 2);
        assert_eq!(bars.get(Session::Post).len(), 1);
        assert_eq!(bars.dropped(), 1);
    }

    #[test]
    fn test_membership_uses_raw_timestamp() {
        let mut classifier = make_classifier();

        // Offset-adjusted this would be negative; membership must ignore the offset.
        assert_eq!(classifier.process(&sample(700)).unwrap(), Some(Session::Regular));

        let bars = classifier.finish();
        let bar = &bars.get(Session::Regular)[0];
        assert_eq!(bar.start_ms(), (700 - 14400) * 1000);
        assert_eq!(bar.end_ms() - bar.start_ms(), 60_000);
    }

    #[test]
    fn test_out_of_range_in_window_sample_is_an_error() {
        let windows = SessionWindows::new(None, TradingWindow::new(i64::MIN, i64::MIN + 600), None);
        let mut classifier = SessionClassifier::new("NASDAQ", "AAPL", -14400, windows);
        let sample = Sample {
            timestamp: i64::MIN,
            ..Sample::default()
        };
        assert!(classifier.process(&sample).is_err());
    }

    #[test]
    fn test_out_of_range_out_of_window_sample_is_dropped() {
        let mut classifier = make_classifier();
        let far_past = Sample {
            timestamp: i64::MIN,
            ..Sample::default()
        };
        assert_eq!(classifier.process(&far_past).unwrap(), None);
        assert_eq!(classifier.process(&sample(600)).unwrap(), Some(Session::Regular));

        let bars = classifier.finish();
        assert_eq!(bars.dropped(), 1);
        assert_eq!(bars.len(), 1);
    }
}
