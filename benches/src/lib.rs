//! Synthetic chart payloads for sessionbars benchmarks.

use serde_json::{Value, json};

/// First regular-session minute of the synthetic trading day (2024-01-02 09:30 ET).
pub const REGULAR_START: i64 = 1_704_205_800;

/// Length of each synthetic session window in seconds.
const PRE_SECONDS: i64 = 5 * 3600 + 1800;
const REGULAR_SECONDS: i64 = 6 * 3600 + 1800;
const POST_SECONDS: i64 = 4 * 3600;

/// Builds a chart payload with one sample per minute starting at the
/// beginning of the pre-market window.
///
/// Every `null_every`-th sample carries `null` values, mimicking minutes
/// without trades. A value of zero disables nulls.
#[must_use]
pub fn day_payload(minutes: usize, null_every: usize) -> String {
    let pre_start = REGULAR_START - PRE_SECONDS;
    let post_start = REGULAR_START + REGULAR_SECONDS;
    let post_end = post_start + POST_SECONDS;

    let timestamps: Vec<i64> = (0..minutes as i64).map(|i| pre_start + i * 60).collect();
    let series = |base: f64| -> Vec<Value> {
        (0..minutes)
            .map(|i| {
                if null_every != 0 && i % null_every == 0 {
                    Value::Null
                } else {
                    json!(base + (i % 100) as f64 * 0.01)
                }
            })
            .collect()
    };

    json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": { "quote": [{
                    "open": series(185.0),
                    "close": series(185.5),
                    "high": series(186.0),
                    "low": series(184.5),
                    "volume": series(1000.0),
                }]},
                "meta": { "tradingPeriods": {
                    "pre": [[{ "start": pre_start, "end": REGULAR_START }]],
                    "regular": [[{ "start": REGULAR_START, "end": post_start }]],
                    "post": [[{ "start": post_start, "end": post_end }]],
                }},
            }],
            "error": null,
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sessionbars_lib::prelude::*;

    #[test]
    fn test_full_day_is_classified() {
        let minutes = ((PRE_SECONDS + REGULAR_SECONDS + POST_SECONDS) / 60) as usize;
        let record = RawRecord::pending("bench", "NASDAQ", "AAPL", day_payload(minutes + 10, 7));
        let outcome = Normalizer::new().process(&record, &Market::new("NASDAQ", -14400));

        let bars = outcome.bars().unwrap();
        assert_eq!(bars.get(Session::Pre).len(), (PRE_SECONDS / 60) as usize);
        assert_eq!(bars.get(Session::Regular).len(), (REGULAR_SECONDS / 60) as usize);
        assert_eq!(bars.get(Session::Post).len(), (POST_SECONDS / 60) as usize);
        assert_eq!(bars.dropped(), 10);
    }
}
