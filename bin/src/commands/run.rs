//! Run command implementation.
//!
//! One normalization pass over a market's pending records.

use anyhow::{Context, Result, bail};
use sessionbars_lib::prelude::*;

/// Normalize the selection's pending records and print the summary.
pub(crate) fn run(data_dir: &DataDir, selection: &Selection, quiet: bool) -> Result<()> {
    let markets = data_dir.markets().with_context(|| {
        format!(
            "Failed to load markets from {}",
            data_dir.markets_path().display()
        )
    })?;

    let driver = Driver::new(markets, data_dir.record_store(), data_dir.bar_store());
    let summary = driver
        .run(selection)
        .with_context(|| format!("Normalization run for {selection} failed"))?;

    if !quiet {
        println!("{summary}");
    }

    if !summary.is_complete() {
        bail!(
            "{} of {} records left pending after write failures",
            summary.failed,
            summary.selected
        );
    }

    Ok(())
}
