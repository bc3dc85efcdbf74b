//! Record normalization.

use sessionbars_types::{Market, RawRecord};
use tracing::trace;

use crate::{
    MalformedReason, Outcome, SessionClassifier,
    chart::{Inspection, inspect},
    payload::parse_payload,
};

/// Turns raw chart records into terminal outcomes.
///
/// `process` has no side effects: the same record and market always yield
/// the same [`Outcome`]. Persisting bars and writing the status back is the
/// caller's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Creates a normalizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes one record against its market.
    ///
    /// Stages run in order and the first failing stage decides the outcome:
    /// parse, upstream error check, structural validation, then per-sample
    /// session classification.
    #[must_use]
    pub fn process(&self, record: &RawRecord, market: &Market) -> Outcome {
        let envelope = match parse_payload(&record.payload) {
            Ok(envelope) => envelope,
            Err(err) => {
                return Outcome::ParseError {
                    message: err.to_string(),
                };
            }
        };

        let chart = match inspect(envelope) {
            Inspection::Upstream { code, description } => {
                return Outcome::ApiError { code, description };
            }
            Inspection::Malformed(reason) => return Outcome::Malformed(reason),
            Inspection::Valid(chart) => chart,
        };

        let mut classifier = SessionClassifier::new(
            market.id(),
            record.code.as_str(),
            market.utc_offset_seconds(),
            chart.windows,
        );
        for sample in &chart.samples {
            if let Err(err) = classifier.process(sample) {
                trace!(record_id = %record.id, error = %err, "Sample cannot be offset");
                return Outcome::Malformed(MalformedReason::TimestampOutOfRange);
            }
        }

        Outcome::Processed(classifier.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sessionbars_types::{RecordStatus, Session};

    // 2024-01-02, US/Eastern trading day.
    const PRE_START: i64 = 1_704_186_000;
    const REGULAR_START: i64 = 1_704_205_800;
    const POST_START: i64 = 1_704_229_200;
    const POST_END: i64 = 1_704_243_600;

    fn periods() -> String {
        format!(
            r#"{{"pre":[[{{"start":{PRE_START},"end":{REGULAR_START}}}]],"regular":[[{{"start":{REGULAR_START},"end":{POST_START}}}]],"post":[[{{"start":{POST_START},"end":{POST_END}}}]]}}"#
        )
    }

    fn chart(timestamps: &[i64]) -> String {
        let list = |value: f64| {
            timestamps
                .iter()
                .map(|_| value.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        let stamps = timestamps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"{{"chart":{{"result":[{{"timestamp":[{stamps}],"indicators":{{"quote":[{{"open":[{open}],"close":[{close}],"high":[{high}],"low":[{low}],"volume":[{volume}]}}]}},"meta":{{"tradingPeriods":{periods}}}}}],"error":null}}}}"#,
            open = list(185.5),
            close = list(186.25),
            high = list(187.0),
            low = list(185.0),
            volume = list(1200.0),
            periods = periods(),
        )
    }

    fn nasdaq() -> Market {
        Market::new("NASDAQ", -14400)
    }

    fn record(payload: impl Into<String>) -> RawRecord {
        RawRecord::pending("rec-1", "NASDAQ", "AAPL", payload)
    }

    #[test]
    fn test_end_to_end_single_regular_bar() {
        let inside = REGULAR_START + 60;
        let outside = POST_END + 600;
        let outcome = Normalizer::new().process(&record(chart(&[inside, outside])), &nasdaq());

        assert_eq!(outcome.status(), RecordStatus::Processed);
        assert!(outcome.message().is_none());

        let bars = outcome.bars().unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars.dropped(), 1);
        assert!(bars.get(Session::Pre).is_empty());
        assert!(bars.get(Session::Post).is_empty());

        let bar = &bars.get(Session::Regular)[0];
        assert_eq!(bar.market, "NASDAQ");
        assert_eq!(bar.code, "AAPL");
        assert_eq!(bar.start_ms(), (inside - 14400) * 1000);
        assert_eq!(bar.end_ms() - bar.start_ms(), 60_000);
        assert_relative_eq!(bar.open.unwrap(), 185.5);
        assert_relative_eq!(bar.close.unwrap(), 186.25);
        assert_relative_eq!(bar.volume.unwrap(), 1200.0);
    }

    #[test]
    fn test_each_sample_lands_in_at_most_one_session() {
        let timestamps = [
            PRE_START - 60,
            PRE_START,
            REGULAR_START - 60,
            REGULAR_START,
            POST_START - 60,
            POST_START,
            POST_END - 60,
            POST_END,
        ];
        let outcome = Normalizer::new().process(&record(chart(&timestamps)), &nasdaq());
        let bars = outcome.bars().unwrap();

        assert_eq!(bars.get(Session::Pre).len(), 2);
        assert_eq!(bars.get(Session::Regular).len(), 2);
        assert_eq!(bars.get(Session::Post).len(), 2);
        assert_eq!(bars.dropped(), 2);
        assert_eq!(bars.sample_count(), timestamps.len());

        for (_, session_bars) in bars.non_empty() {
            for bar in session_bars {
                assert_eq!(bar.end_ms() - bar.start_ms(), 60_000);
            }
        }
        let regular_starts: Vec<_> = bars
            .get(Session::Regular)
            .iter()
            .map(|bar| bar.start_ms())
            .collect();
        assert_eq!(
            regular_starts,
            vec![
                (REGULAR_START - 14400) * 1000,
                (POST_START - 60 - 14400) * 1000
            ]
        );
    }

    #[test]
    fn test_all_samples_dropped_is_still_processed() {
        let outcome =
            Normalizer::new().process(&record(chart(&[POST_END, POST_END + 60])), &nasdaq());
        assert_eq!(outcome.status(), RecordStatus::Processed);
        let bars = outcome.bars().unwrap();
        assert!(bars.is_empty());
        assert_eq!(bars.dropped(), 2);
    }

    #[test]
    fn test_process_is_pure() {
        let normalizer = Normalizer::new();
        let record = record(chart(&[REGULAR_START, POST_START, POST_END]));
        let market = nasdaq();

        let first = normalizer.process(&record, &market);
        let second = normalizer.process(&record, &market);
        assert_eq!(first, second);
        assert!(record.is_pending());
    }

    #[test]
    fn test_parse_error_carries_parser_text() {
        let payload = r#"{"chart": "#;
        let expected = serde_json::from_str::<serde_json::Value>(payload)
            .unwrap_err()
            .to_string();

        let outcome = Normalizer::new().process(&record(payload), &nasdaq());
        assert_eq!(outcome.status(), RecordStatus::ParseError);
        assert_eq!(outcome.message(), Some(expected));
        assert!(outcome.bars().is_none());
    }

    #[test]
    fn test_script_payload_is_parse_error() {
        let outcome =
            Normalizer::new().process(&record("({chart: {result: []}})"), &nasdaq());
        assert_eq!(outcome.status(), RecordStatus::ParseError);
    }

    #[test]
    fn test_wrong_value_type_is_parse_error() {
        let payload = r#"{"chart":{"result":[{"timestamp":["1704205800"]}]}}"#;
        let outcome = Normalizer::new().process(&record(payload), &nasdaq());
        assert_eq!(outcome.status(), RecordStatus::ParseError);
        assert!(outcome.message().is_some());
    }

    #[test]
    fn test_upstream_error_is_api_error() {
        let payload = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let outcome = Normalizer::new().process(&record(payload), &nasdaq());

        assert_eq!(outcome.status(), RecordStatus::ApiError);
        let message = outcome.message().unwrap();
        assert!(message.contains("Not Found"));
        assert!(message.contains("No data found, symbol may be delisted"));
        assert!(outcome.bars().is_none());
    }

    #[test]
    fn test_missing_timestamps_is_malformed() {
        let payload = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        let outcome = Normalizer::new().process(&record(payload), &nasdaq());

        assert_eq!(
            outcome,
            Outcome::Malformed(MalformedReason::MissingTimestamps)
        );
        assert!(outcome.message().is_none());
        assert!(outcome.bars().is_none());
    }

    fn single_window_chart(timestamps: &str, start: i64, end: i64) -> String {
        format!(
            r#"{{"chart":{{"result":[{{"timestamp":[{timestamps}],"indicators":{{"quote":[{{}}]}},"meta":{{"tradingPeriods":{{"regular":[[{{"start":{start},"end":{end}}}]]}}}}}}]}}}}"#
        )
    }

    #[test]
    fn test_unrepresentable_in_window_timestamp_is_malformed() {
        let payload = single_window_chart(
            "200,9000000000000000",
            100,
            9_000_000_000_001_000,
        );
        let outcome = Normalizer::new().process(&record(payload), &nasdaq());
        assert_eq!(
            outcome,
            Outcome::Malformed(MalformedReason::TimestampOutOfRange)
        );
    }

    #[test]
    fn test_unrepresentable_out_of_window_timestamp_is_dropped() {
        let payload = single_window_chart("200,9000000000000000", 100, 300);
        let outcome = Normalizer::new().process(&record(payload), &nasdaq());

        assert_eq!(outcome.status(), RecordStatus::Processed);
        let bars = outcome.bars().unwrap();
        assert_eq!(bars.get(Session::Regular).len(), 1);
        assert_eq!(bars.get(Session::Regular)[0].start_ms(), (200 - 14400) * 1000);
        assert_eq!(bars.dropped(), 1);
    }

    #[test]
    fn test_null_values_become_missing_fields() {
        let payload = format!(
            r#"{{"chart":{{"result":[{{"timestamp":[{REGULAR_START}],"indicators":{{"quote":[{{"open":[null],"close":[null],"high":[null],"low":[null],"volume":[null]}}]}},"meta":{{"tradingPeriods":{periods}}}}}]}}}}"#,
            periods = periods(),
        );
        let outcome = Normalizer::new().process(&record(payload), &nasdaq());
        let bar = &outcome.bars().unwrap().get(Session::Regular)[0];
        assert!(bar.open.is_none());
        assert!(bar.volume.is_none());
    }
}
