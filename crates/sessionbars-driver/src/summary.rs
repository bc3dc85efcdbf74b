//! Run summary.

use std::fmt;

use sessionbars_types::{RecordStatus, Session};
use uuid::Uuid;

/// Counts reported by one driver pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Run identifier, also attached to the run's log span.
    pub run_id: Uuid,
    /// Market processed.
    pub market: String,
    /// Pending records selected.
    pub selected: usize,
    /// Records that ended `PARSE_ERROR`.
    pub parse_errors: usize,
    /// Records that ended `API_ERROR`.
    pub api_errors: usize,
    /// Records that ended `MALFORMED`.
    pub malformed: usize,
    /// Records that ended `PROCESSED`.
    pub processed: usize,
    /// Records left pending because a write failed.
    pub failed: usize,
    /// Bars written to the pre-market store.
    pub pre_bars: usize,
    /// Bars written to the regular-session store.
    pub regular_bars: usize,
    /// Bars written to the post-market store.
    pub post_bars: usize,
    /// Samples outside every trading window.
    pub dropped: usize,
}

impl RunSummary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new(run_id: Uuid, market: impl Into<String>) -> Self {
        Self {
            run_id,
            market: market.into(),
            selected: 0,
            parse_errors: 0,
            api_errors: 0,
            malformed: 0,
            processed: 0,
            failed: 0,
            pre_bars: 0,
            regular_bars: 0,
            post_bars: 0,
            dropped: 0,
        }
    }

    /// Returns the number of bars written across sessions.
    #[must_use]
    pub const fn total_bars(&self) -> usize {
        self.pre_bars + self.regular_bars + self.post_bars
    }

    /// Returns the number of records that reached a terminal status.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.parse_errors + self.api_errors + self.malformed + self.processed
    }

    /// Returns true if every selected record reached a terminal status.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }

    pub(crate) const fn record_status(&mut self, status: RecordStatus) {
        match status {
            RecordStatus::Pending => self.failed += 1,
            RecordStatus::ParseError => self.parse_errors += 1,
            RecordStatus::ApiError => self.api_errors += 1,
            RecordStatus::Malformed => self.malformed += 1,
            RecordStatus::Processed => self.processed += 1,
        }
    }

    pub(crate) const fn add_bars(&mut self, session: Session, count: usize) {
        match session {
            Session::Pre => self.pre_bars += count,
            Session::Regular => self.regular_bars += count,
            Session::Post => self.post_bars += count,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run {} on {}", self.run_id, self.market)?;
        writeln!(f, "  Selected:     {}", self.selected)?;
        writeln!(f, "  Processed:    {}", self.processed)?;
        writeln!(f, "  Parse errors: {}", self.parse_errors)?;
        writeln!(f, "  API errors:   {}", self.api_errors)?;
        writeln!(f, "  Malformed:    {}", self.malformed)?;
        writeln!(f, "  Failed:       {}", self.failed)?;
        writeln!(
            f,
            "  Bars:         {} (pre {}, regular {}, post {})",
            self.total_bars(),
            self.pre_bars,
            self.regular_bars,
            self.post_bars
        )?;
        write!(f, "  Dropped:      {}", self.dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = RunSummary::new(Uuid::nil(), "NASDAQ");
        summary.record_status(RecordStatus::Processed);
        summary.record_status(RecordStatus::Processed);
        summary.record_status(RecordStatus::ApiError);
        summary.record_status(RecordStatus::Pending);
        summary.add_bars(Session::Regular, 390);
        summary.add_bars(Session::Post, 10);

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.api_errors, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.completed(), 3);
        assert!(!summary.is_complete());
        assert_eq!(summary.regular_bars, 390);
        assert_eq!(summary.total_bars(), 400);
    }

    #[test]
    fn test_display() {
        let summary = RunSummary::new(Uuid::nil(), "NASDAQ");
        let text = summary.to_string();
        assert!(text.starts_with("Run 00000000-0000-0000-0000-000000000000 on NASDAQ"));
        assert!(text.contains("Dropped:      0"));
    }
}
