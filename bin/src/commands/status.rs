//! Status command implementation.
//!
//! Counts a market's records per processing status.

use anyhow::{Context, Result};
use sessionbars_lib::prelude::*;

/// Print the number of records in each status.
pub(crate) fn status(data_dir: &DataDir, selection: &Selection) -> Result<()> {
    let store = data_dir.record_store();

    println!("{:<15} {:>10}", "STATUS", "RECORDS");
    println!("{}", "-".repeat(26));

    let mut total = 0;
    for &status in RecordStatus::all() {
        let count = store
            .query_by_status(&selection.market, selection.code(), status)
            .with_context(|| format!("Failed to list records for {selection}"))?
            .len();
        total += count;
        println!("{:<15} {:>10}", status.as_str(), count);
    }

    println!("\nTotal: {total} records");
    Ok(())
}
