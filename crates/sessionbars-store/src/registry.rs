//! Market reference data.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use sessionbars_types::Market;

use crate::{MarketConfig, Result, StoreError};

/// Registry of configured markets.
#[derive(Debug, Clone, Default)]
pub struct MarketRegistry {
    markets: BTreeMap<String, Market>,
}

impl MarketRegistry {
    /// Creates a registry from a list of markets.
    ///
    /// # Errors
    ///
    /// Returns an error if two markets share an identifier.
    pub fn new(markets: impl IntoIterator<Item = Market>) -> Result<Self> {
        let mut registry = BTreeMap::new();
        for market in markets {
            let id = market.id().to_string();
            if registry.insert(id.clone(), market).is_some() {
                return Err(StoreError::DuplicateMarket(id));
            }
        }
        Ok(Self { markets: registry })
    }

    /// Loads a registry from a JSON array of markets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// lists a market twice.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let markets: Vec<Market> =
            serde_json::from_str(&content).map_err(|e| StoreError::ParseJson {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::new(markets)
    }

    /// Writes the registry as a JSON array of markets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let markets: Vec<&Market> = self.all().collect();
        let json = serde_json::to_string_pretty(&markets)?;
        fs::write(path, json).map_err(|e| StoreError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Looks up a market by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Market> {
        self.markets.get(id)
    }

    /// Returns all markets ordered by identifier.
    pub fn all(&self) -> impl Iterator<Item = &Market> {
        self.markets.values()
    }

    /// Returns the number of markets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markets.len()
    }

    /// Returns true if no market is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

impl MarketConfig for MarketRegistry {
    fn find(&self, market_id: &str) -> Result<Option<Market>> {
        Ok(self.get(market_id).cloned())
    }
}
