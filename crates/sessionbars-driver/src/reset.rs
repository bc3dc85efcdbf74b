//! Returning terminal records to pending.

use sessionbars_store::RawRecordStore;
use sessionbars_types::RecordStatus;
use tracing::{debug, info};

use crate::{DriverError, Result, Selection};

/// Resets the selection's records in the given terminal statuses to
/// pending, clearing their messages.
///
/// An empty `statuses` slice selects every failure status, leaving
/// processed records alone. Returns the number of records reset.
///
/// # Errors
///
/// Returns an error if a status is not terminal, or if records cannot be
/// listed or written. Records reset before a write failure stay reset.
pub fn reset_records<R>(
    store: &R,
    selection: &Selection,
    statuses: &[RecordStatus],
) -> Result<usize>
where
    R: RawRecordStore + ?Sized,
{
    let statuses = if statuses.is_empty() {
        RecordStatus::failures()
    } else {
        statuses
    };
    if let Some(&status) = statuses.iter().find(|status| !status.is_terminal()) {
        return Err(DriverError::NotTerminal(status));
    }

    let mut reset = 0;
    for &status in statuses {
        for mut record in store.query_by_status(&selection.market, selection.code(), status)? {
            record.reset()?;
            store.upsert(&record)?;
            debug!(record_id = %record.id, code = %record.code, from = %status, "Record reset");
            reset += 1;
        }
    }

    info!(selection = %selection, records = reset, "Records reset to pending");
    Ok(reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sessionbars_store::MemoryRecordStore;
    use sessionbars_types::RawRecord;

    fn completed(id: &str, code: &str, status: RecordStatus) -> RawRecord {
        let mut record = RawRecord::pending(id, "NASDAQ", code, "{}");
        record
            .complete(status, Some("code:500 description:Internal".to_string()))
            .unwrap();
        record
    }

    fn store() -> MemoryRecordStore {
        MemoryRecordStore::with_records([
            completed("1", "AAPL", RecordStatus::ApiError),
            completed("2", "AAPL", RecordStatus::ParseError),
            completed("3", "AAPL", RecordStatus::Processed),
            completed("4", "MSFT", RecordStatus::ApiError),
            RawRecord::pending("5", "NASDAQ", "AAPL", "{}"),
        ])
    }

    #[test]
    fn test_default_resets_failures_only() {
        let store = store();
        let count = reset_records(&store, &Selection::market("NASDAQ"), &[]).unwrap();

        assert_eq!(count, 3);
        let reset = store.get("NASDAQ", "1").unwrap();
        assert!(reset.is_pending());
        assert!(reset.message.is_none());
        assert_eq!(store.get("NASDAQ", "3").unwrap().status, RecordStatus::Processed);
    }

    #[test]
    fn test_reset_by_status_and_code() {
        let store = store();
        let selection = Selection::market("NASDAQ").with_code("AAPL");

        let count = reset_records(&store, &selection, &[RecordStatus::ApiError]).unwrap();
        assert_eq!(count, 1);
        assert!(store.get("NASDAQ", "1").unwrap().is_pending());
        assert_eq!(store.get("NASDAQ", "4").unwrap().status, RecordStatus::ApiError);
    }

    #[test]
    fn test_reset_pending_rejected() {
        let store = store();
        let result = reset_records(&store, &Selection::market("NASDAQ"), &[RecordStatus::Pending]);
        assert!(matches!(
            result,
            Err(DriverError::NotTerminal(RecordStatus::Pending))
        ));
    }
}
