//! Markets command implementation.

use anyhow::{Context, Result};
use sessionbars_lib::prelude::*;

/// List configured markets and their UTC offsets.
pub(crate) fn list_markets(data_dir: &DataDir) -> Result<()> {
    let path = data_dir.markets_path();
    let registry = data_dir
        .markets()
        .with_context(|| format!("Failed to load markets from {}", path.display()))?;

    if registry.is_empty() {
        println!("No markets configured in {}", path.display());
        return Ok(());
    }

    println!("{:<15} {:>12} {:>10}", "ID", "OFFSET (s)", "UTC");
    println!("{}", "-".repeat(39));

    for market in registry.all() {
        let offset = market.utc_offset_seconds();
        let sign = if offset < 0 { '-' } else { '+' };
        let abs = offset.unsigned_abs();
        println!(
            "{:<15} {:>12} {:>10}",
            market.id(),
            offset,
            format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
        );
    }

    println!("\nTotal: {} markets", registry.len());
    Ok(())
}
