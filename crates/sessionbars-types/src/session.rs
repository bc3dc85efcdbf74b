//! Trading sessions and their half-open time windows.

use serde::{Deserialize, Serialize};

/// Trading session a bar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    /// Pre-market trading.
    Pre,
    /// Regular trading hours.
    Regular,
    /// Post-market (after hours) trading.
    Post,
}

impl Session {
    /// Returns the session name as used on the wire and in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Regular => "regular",
            Self::Post => "post",
        }
    }

    /// Returns all sessions in classification priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pre, Self::Regular, Self::Post]
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open time window `[start, end)` in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingWindow {
    /// Window start (inclusive).
    pub start: i64,
    /// Window end (exclusive).
    pub end: i64,
}

impl TradingWindow {
    /// Creates a new window.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true if the raw timestamp lies inside the window.
    #[must_use]
    pub const fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

/// The three session windows of one trading day.
///
/// Only the regular window is mandatory; a missing pre- or post-market
/// window never matches any sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindows {
    /// Pre-market window.
    pub pre: Option<TradingWindow>,
    /// Regular trading hours window.
    pub regular: TradingWindow,
    /// Post-market window.
    pub post: Option<TradingWindow>,
}

impl SessionWindows {
    /// Creates the windows for a trading day.
    #[must_use]
    pub const fn new(
        pre: Option<TradingWindow>,
        regular: TradingWindow,
        post: Option<TradingWindow>,
    ) -> Self {
        Self { pre, regular, post }
    }

    /// Returns the window of the given session, if present.
    #[must_use]
    pub const fn get(&self, session: Session) -> Option<TradingWindow> {
        match session {
            Session::Pre => self.pre,
            Session::Regular => Some(self.regular),
            Session::Post => self.post,
        }
    }

    /// Classifies a raw (un-offset) timestamp.
    ///
    /// Windows are tested in priority order pre, regular, post and the
    /// first containing window wins. Returns `None` when no window
    /// contains the timestamp.
    #[must_use]
    pub fn classify(&self, timestamp: i64) -> Option<Session> {
        Session::all().iter().copied().find(|&session| {
            self.get(session)
                .is_some_and(|window| window.contains(timestamp))
        })
    }
}
