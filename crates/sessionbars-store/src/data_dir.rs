//! Filesystem layout of a sessionbars data directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sessionbars_types::Session;

use crate::{FsRecordStore, JsonlBarStore, MarketRegistry, Result, StoreError};

/// Data directory layout.
///
/// ```text
/// <root>/markets.json
/// <root>/raw/<market>/<record-id>.json
/// <root>/bars/<market>/<session>.jsonl
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Creates a layout rooted at the given path.
    ///
    /// Nothing is created on disk until a store writes.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the data directory, falling back to
    /// [`DataDir::default_path`] when no path is configured.
    #[must_use]
    pub fn resolve(configured: Option<PathBuf>) -> Self {
        Self::new(configured.unwrap_or_else(Self::default_path))
    }

    /// Returns the default path for sessionbars data.
    ///
    /// Uses the `directories` crate to find the appropriate location:
    /// - Linux: `~/.local/share/sessionbars/`
    /// - macOS: `~/Library/Application Support/sessionbars/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\sessionbars\`
    ///
    /// Falls back to `~/.sessionbars/` if the platform-specific location
    /// cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "sessionbars").map_or_else(dirs_fallback, |proj_dirs| {
            proj_dirs.data_dir().to_path_buf()
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the market reference file.
    #[must_use]
    pub fn markets_path(&self) -> PathBuf {
        self.root.join("markets.json")
    }

    /// Returns the directory holding raw records.
    #[must_use]
    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    /// Returns the directory holding bar files.
    #[must_use]
    pub fn bars_dir(&self) -> PathBuf {
        self.root.join("bars")
    }

    /// Returns the bar file of a market session.
    ///
    /// # Errors
    ///
    /// Returns an error if the market identifier is not a valid file name.
    pub fn bars_path(&self, market: &str, session: Session) -> Result<PathBuf> {
        self.bar_store().path(market, session)
    }

    /// Loads the market registry.
    ///
    /// # Errors
    ///
    /// Returns an error if `markets.json` cannot be read or parsed.
    pub fn markets(&self) -> Result<MarketRegistry> {
        MarketRegistry::load(&self.markets_path())
    }

    /// Opens the raw record store.
    #[must_use]
    pub fn record_store(&self) -> FsRecordStore {
        FsRecordStore::new(self.raw_dir())
    }

    /// Opens the bar store.
    #[must_use]
    pub fn bar_store(&self) -> JsonlBarStore {
        JsonlBarStore::new(self.bars_dir())
    }
}

/// Rejects identifiers that would escape their directory.
pub(crate) fn checked_name<'a>(kind: &'static str, name: &'a str) -> Result<&'a str> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(name)
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".sessionbars")
}
