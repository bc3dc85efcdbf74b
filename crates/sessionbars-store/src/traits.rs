//! Store capabilities passed to the driver.

use sessionbars_types::{Bar, Market, RawRecord, RecordStatus, Session};

use crate::Result;

/// Read-only market reference data.
pub trait MarketConfig {
    /// Looks up a market by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read. An unknown
    /// market is `Ok(None)`.
    fn find(&self, market_id: &str) -> Result<Option<Market>>;
}

/// Raw payload records keyed by identity.
pub trait RawRecordStore {
    /// Returns the records of a market with the given status.
    ///
    /// A `code` of `None` selects every code. Records are returned in
    /// identifier order.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be listed.
    fn query_by_status(
        &self,
        market: &str,
        code: Option<&str>,
        status: RecordStatus,
    ) -> Result<Vec<RawRecord>>;

    /// Inserts or replaces a record by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn upsert(&self, record: &RawRecord) -> Result<()>;
}

/// Append-only bar destinations, one per session.
pub trait BarStore {
    /// Appends a batch of bars to a session destination.
    ///
    /// The batch succeeds or fails as a whole.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be written.
    fn insert_many(&self, session: Session, bars: &[Bar]) -> Result<()>;
}

impl<T: MarketConfig + ?Sized> MarketConfig for &T {
    fn find(&self, market_id: &str) -> Result<Option<Market>> {
        (**self).find(market_id)
    }
}

impl<T: RawRecordStore + ?Sized> RawRecordStore for &T {
    fn query_by_status(
        &self,
        market: &str,
        code: Option<&str>,
        status: RecordStatus,
    ) -> Result<Vec<RawRecord>> {
        (**self).query_by_status(market, code, status)
    }

    fn upsert(&self, record: &RawRecord) -> Result<()> {
        (**self).upsert(record)
    }
}

impl<T: BarStore + ?Sized> BarStore for &T {
    fn insert_many(&self, session: Session, bars: &[Bar]) -> Result<()> {
        (**self).insert_many(session, bars)
    }
}
