//! Reset command implementation.

use anyhow::{Context, Result};
use sessionbars_lib::prelude::*;

/// Return the selection's terminal records to pending.
pub(crate) fn reset(
    data_dir: &DataDir,
    selection: &Selection,
    statuses: &[RecordStatus],
    quiet: bool,
) -> Result<()> {
    let store = data_dir.record_store();
    let count = reset_records(&store, selection, statuses)
        .with_context(|| format!("Failed to reset records for {selection}"))?;

    if !quiet {
        println!("Reset {count} records to pending");
    }
    Ok(())
}
