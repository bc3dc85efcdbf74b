//! Raw records stored as one JSON file each.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sessionbars_types::{RawRecord, RecordStatus};
use tracing::{debug, warn};

use crate::{RawRecordStore, Result, StoreError, data_dir::checked_name};

/// Raw record store over `<root>/<market>/<record-id>.json`.
///
/// Upserts write a temporary file and rename it over the record, so a
/// record file is always either the old or the new version.
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
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

    /// Returns the path of a record file.
    ///
    /// # Errors
    ///
    /// Returns an error if the market or record identifier is not a valid
    /// file name.
    pub fn record_path(&self, market: &str, id: &str) -> Result<PathBuf> {
        Ok(self
            .root
            .join(checked_name("market", market)?)
            .join(format!("{}.json", checked_name("record id", id)?)))
    }

    /// Loads one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn get(&self, market: &str, id: &str) -> Result<Option<RawRecord>> {
        let path = self.record_path(market, id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::ReadFile { path, source: e }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::ParseJson { path, source: e })
    }

    /// Lists every readable record of a market in identifier order.
    ///
    /// Unreadable or corrupt files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the market directory cannot be listed.
    pub fn list(&self, market: &str) -> Result<Vec<RawRecord>> {
        let dir = self.root.join(checked_name("market", market)?);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ReadDir { path: dir, source: e }),
        };

        let mut records = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadDir {
                path: dir.clone(),
                source: e,
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable record file");
                    continue;
                }
            };

            match serde_json::from_str::<RawRecord>(&content) {
                Ok(record) if record.market == market => records.push(record),
                Ok(record) => {
                    warn!(
                        path = %path.display(),
                        market = %record.market,
                        "Skipping record filed under another market"
                    );
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping corrupt record file");
                }
            }
        }

        records.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(records)
    }
}

impl RawRecordStore for FsRecordStore {
    fn query_by_status(
        &self,
        market: &str,
        code: Option<&str>,
        status: RecordStatus,
    ) -> Result<Vec<RawRecord>> {
        Ok(self
            .list(market)?
            .into_iter()
            .filter(|record| record.status == status)
            .filter(|record| code.is_none_or(|code| record.code == code))
            .collect())
    }

    fn upsert(&self, record: &RawRecord) -> Result<()> {
        let path = self.record_path(&record.market, &record.id)?;
        let dir = self.root.join(&record.market);
        fs::create_dir_all(&dir).map_err(|e| StoreError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;

        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = dir.join(format!(".{}.json.tmp", record.id));
        fs::write(&tmp_path, json).map_err(|e| StoreError::WriteFile {
            path: tmp_path.clone(),
            source: e,
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| StoreError::WriteFile { path, source: e })?;

        debug!(
            market = %record.market,
            record_id = %record.id,
            status = %record.status,
            "Record written"
        );
        Ok(())
    }
}
