//! Terminal outcome of normalizing one raw record.

use sessionbars_types::{Bar, RawRecord, RecordStatus, Result, Session};

use crate::MalformedReason;

/// Bars of one record partitioned by session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionBars {
    pre: Vec<Bar>,
    regular: Vec<Bar>,
    post: Vec<Bar>,
    dropped: usize,
}

impl SessionBars {
    /// Creates an empty partition.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pre: Vec::new(),
            regular: Vec::new(),
            post: Vec::new(),
            dropped: 0,
        }
    }

    pub(crate) fn push(&mut self, session: Session, bar: Bar) {
        match session {
            Session::Pre => self.pre.push(bar),
            Session::Regular => self.regular.push(bar),
            Session::Post => self.post.push(bar),
        }
    }

    pub(crate) const fn record_dropped(&mut self) {
        self.dropped += 1;
    }

    /// Returns the bars of one session.
    #[must_use]
    pub fn get(&self, session: Session) -> &[Bar] {
        match session {
            Session::Pre => &self.pre,
            Session::Regular => &self.regular,
            Session::Post => &self.post,
        }
    }

    /// Iterates over sessions that received at least one bar, in
    /// priority order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Session, &[Bar])> {
        Session::all()
            .iter()
            .map(|&session| (session, self.get(session)))
            .filter(|(_, bars)| !bars.is_empty())
    }

    /// Returns the number of samples that fell outside every window.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns the total number of bars across sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pre.len() + self.regular.len() + self.post.len()
    }

    /// Returns true if no bar was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of samples classified or dropped.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.len() + self.dropped
    }
}

/// Terminal outcome of one record.
///
/// There is no pending variant: every processed record leaves the
/// pipeline in exactly one terminal status.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The payload was not well-formed data.
    ParseError {
        /// Parser error text.
        message: String,
    },
    /// The vendor returned an error object.
    ApiError {
        /// Vendor error code.
        code: String,
        /// Vendor error description.
        description: String,
    },
    /// The payload lacked required structure.
    Malformed(MalformedReason),
    /// Samples were classified into session bars.
    Processed(SessionBars),
}

impl Outcome {
    /// Returns the terminal status for the record.
    #[must_use]
    pub const fn status(&self) -> RecordStatus {
        match self {
            Self::ParseError { .. } => RecordStatus::ParseError,
            Self::ApiError { .. } => RecordStatus::ApiError,
            Self::Malformed(_) => RecordStatus::Malformed,
            Self::Processed(_) => RecordStatus::Processed,
        }
    }

    /// Returns the message stored alongside the status.
    ///
    /// Only parse and upstream errors carry one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::ParseError { message } => Some(message.clone()),
            Self::ApiError { code, description } => {
                Some(format!("code:{code} description:{description}"))
            }
            Self::Malformed(_) | Self::Processed(_) => None,
        }
    }

    /// Returns the bars of a processed record.
    #[must_use]
    pub const fn bars(&self) -> Option<&SessionBars> {
        match self {
            Self::Processed(bars) => Some(bars),
            _ => None,
        }
    }

    /// Writes the terminal status and message onto a pending record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is no longer pending.
    pub fn apply_to(&self, record: &mut RawRecord) -> Result<()> {
        record.complete(self.status(), self.message())
    }
}
