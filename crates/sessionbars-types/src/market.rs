//! Market reference data.

use serde::{Deserialize, Serialize};

/// A market whose raw quote payloads are normalized.
///
/// Markets are immutable reference data, looked up once per processing run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    /// Unique identifier (e.g., "NASDAQ").
    id: String,
    /// Offset from UTC in seconds, added to every sample timestamp.
    utc_offset_seconds: i32,
}

impl Market {
    /// Creates a new market.
    #[must_use]
    pub fn new(id: impl Into<String>, utc_offset_seconds: i32) -> Self {
        Self {
            id: id.into(),
            utc_offset_seconds,
        }
    }

    /// Returns the market identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the UTC offset in seconds.
    #[must_use]
    pub const fn utc_offset_seconds(&self) -> i32 {
        self.utc_offset_seconds
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (UTC{:+}s)", self.id, self.utc_offset_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_creation() {
        let market = Market::new("NASDAQ", -14400);
        assert_eq!(market.id(), "NASDAQ");
        assert_eq!(market.utc_offset_seconds(), -14400);
    }

    #[test]
    fn test_market_display() {
        assert_eq!(Market::new("NASDAQ", -14400).to_string(), "NASDAQ (UTC-14400s)");
        assert_eq!(Market::new("HKEX", 28800).to_string(), "HKEX (UTC+28800s)");
    }

    #[test]
    fn test_market_serde_field_names() {
        let market: Market =
            serde_json::from_str(r#"{"id":"LSE","utc_offset_seconds":3600}"#).unwrap();
        assert_eq!(market, Market::new("LSE", 3600));
    }
}
