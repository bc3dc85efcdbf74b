//! Append-only JSON Lines bar files.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sessionbars_types::{Bar, Session};
use tracing::{debug, warn};

use crate::{BarStore, Result, StoreError, data_dir::checked_name};

/// Bar store over `<root>/<market>/<session>.jsonl`.
///
/// Each line is one bar. A batch is serialized in full before the file is
/// opened and is then appended with a single write.
#[derive(Debug, Clone)]
pub struct JsonlBarStore {
    root: PathBuf,
}

impl JsonlBarStore {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the bar file of a market session.
    ///
    /// # Errors
    ///
    /// Returns an error if the market identifier is not a valid file name.
    pub fn path(&self, market: &str, session: Session) -> Result<PathBuf> {
        Ok(self
            .root
            .join(checked_name("market", market)?)
            .join(format!("{session}.jsonl")))
    }

    /// Reads back the bars of a market session.
    ///
    /// Corrupt lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read(&self, market: &str, session: Session) -> Result<Vec<Bar>> {
        let path = self.path(market, session)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ReadFile { path, source: e }),
        };

        let mut bars = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Bar>(line) {
                Ok(bar) => bars.push(bar),
                Err(e) => {
                    warn!(path = %path.display(), line = index + 1, error = %e, "Skipping corrupt bar line");
                }
            }
        }
        Ok(bars)
    }

    fn append(&self, market: &str, session: Session, lines: &str) -> Result<()> {
        let path = self.path(market, session)?;
        let dir = self.root.join(market);
        fs::create_dir_all(&dir).map_err(|e| StoreError::CreateDir {
            path: dir,
            source: e,
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::WriteFile {
                path: path.clone(),
                source: e,
            })?;
        file.write_all(lines.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| StoreError::WriteFile { path, source: e })
    }
}

impl BarStore for JsonlBarStore {
    fn insert_many(&self, session: Session, bars: &[Bar]) -> Result<()> {
        if bars.is_empty() {
            return Ok(());
        }

        let mut by_market: BTreeMap<&str, String> = BTreeMap::new();
        for bar in bars {
            checked_name("market", &bar.market)?;
            let line = serde_json::to_string(bar)?;
            let buffer = by_market.entry(bar.market.as_str()).or_default();
            buffer.push_str(&line);
            buffer.push('\n');
        }

        for (market, lines) in &by_market {
            self.append(market, session, lines)?;
        }

        debug!(session = %session, bars = bars.len(), "Bars appended");
        Ok(())
    }
}
