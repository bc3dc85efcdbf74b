//! Record selection.

use std::fmt;

/// Market and optional code whose pending records a pass processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Market identifier.
    pub market: String,
    /// Instrument code; `None` selects every code of the market.
    pub code: Option<String>,
}

impl Selection {
    /// Selects every code of a market.
    #[must_use]
    pub fn market(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            code: None,
        }
    }

    /// Restricts the selection to one code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the code filter.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}:{code}", self.market),
            None => write!(f, "{}:*", self.market),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        let all = Selection::market("NASDAQ");
        assert_eq!(all.code(), None);
        assert_eq!(all.to_string(), "NASDAQ:*");

        let aapl = Selection::market("NASDAQ").with_code("AAPL");
        assert_eq!(aapl.code(), Some("AAPL"));
        assert_eq!(aapl.to_string(), "NASDAQ:AAPL");
    }
}
