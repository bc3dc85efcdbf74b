//! In-memory stores.

use std::collections::BTreeMap;

use parking_lot::{Mutex, RwLock};
use sessionbars_types::{Bar, RawRecord, RecordId, RecordStatus, Session};

use crate::{BarStore, RawRecordStore, Result};

/// Raw records held in memory, keyed by market and identifier.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<(String, RecordId), RawRecord>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = RawRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.write();
            for record in records {
                map.insert((record.market.clone(), record.id.clone()), record);
            }
        }
        store
    }

    /// Returns a copy of one record.
    #[must_use]
    pub fn get(&self, market: &str, id: &str) -> Option<RawRecord> {
        self.records
            .read()
            .get(&(market.to_string(), id.to_string()))
            .cloned()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RawRecordStore for MemoryRecordStore {
    fn query_by_status(
        &self,
        market: &str,
        code: Option<&str>,
        status: RecordStatus,
    ) -> Result<Vec<RawRecord>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|record| record.market == market && record.status == status)
            .filter(|record| code.is_none_or(|code| record.code == code))
            .cloned()
            .collect())
    }

    fn upsert(&self, record: &RawRecord) -> Result<()> {
        self.records
            .write()
            .insert((record.market.clone(), record.id.clone()), record.clone());
        Ok(())
    }
}

/// Bars held in memory, one list per session.
#[derive(Debug, Default)]
pub struct MemoryBarStore {
    pre: Mutex<Vec<Bar>>,
    regular: Mutex<Vec<Bar>>,
    post: Mutex<Vec<Bar>>,
}

impl MemoryBarStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn bucket(&self, session: Session) -> &Mutex<Vec<Bar>> {
        match session {
            Session::Pre => &self.pre,
            Session::Regular => &self.regular,
            Session::Post => &self.post,
        }
    }

    /// Returns a copy of the bars written to a session.
    #[must_use]
    pub fn bars(&self, session: Session) -> Vec<Bar> {
        self.bucket(session).lock().clone()
    }

    /// Returns the number of bars across sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        Session::all()
            .iter()
            .map(|&session| self.bucket(session).lock().len())
            .sum()
    }

    /// Returns true if no bar has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BarStore for MemoryBarStore {
    fn insert_many(&self, session: Session, bars: &[Bar]) -> Result<()> {
        self.bucket(session).lock().extend_from_slice(bars);
        Ok(())
    }
}
