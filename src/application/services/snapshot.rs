//! Snapshot service
//!
//! Loads and saves the record store snapshot: a TOML document holding
//! `[[warehouses]]` and `[[locations]]` tables.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{LocationKind, LocationRecord, Warehouse};
use crate::infrastructure::traits::FileSystem;

/// One resolved record store snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
}

impl Snapshot {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize snapshot".to_string(),
            source: Box::new(e),
        })
    }

    /// Small demo store: a stock view with two aisles and an orphaned scrap bin.
    pub fn sample() -> Self {
        let wh = "WH";
        Self {
            warehouses: vec![Warehouse {
                id: wh.to_string(),
                name: "Main Warehouse".to_string(),
                code: Some("WH".to_string()),
            }],
            locations: vec![
                LocationRecord::new("1", "Stock", wh, LocationKind::View)
                    .with_qualified_name("WH/Stock"),
                LocationRecord::new("2", "Receiving", wh, LocationKind::Internal)
                    .with_parent("1")
                    .with_qualified_name("WH/Stock/Receiving")
                    .with_item_count(12),
                LocationRecord::new("3", "Aisle A", wh, LocationKind::Internal)
                    .with_parent("1")
                    .with_qualified_name("WH/Stock/Aisle A")
                    .with_item_count(40),
                LocationRecord::new("8", "Damaged", wh, LocationKind::Internal)
                    .with_parent("99")
                    .with_qualified_name("WH/Damaged")
                    .scrap()
                    .with_item_count(3),
            ],
        }
    }
}

/// Service reading and writing snapshot files.
pub struct SnapshotService {
    fs: Arc<dyn FileSystem>,
}

impl SnapshotService {
    /// Create a new snapshot service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Snapshot> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::SnapshotNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)?;
        let snapshot = Snapshot::parse(&content).map_err(|e| ApplicationError::Snapshot {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        debug!(
            "load: {} warehouses, {} locations",
            snapshot.warehouses.len(),
            snapshot.locations.len()
        );
        Ok(snapshot)
    }

    /// Write `snapshot` to `path`, refusing to replace an existing file
    /// unless `overwrite` is set.
    #[instrument(level = "debug", skip(self, snapshot))]
    pub fn save(&self, path: &Path, snapshot: &Snapshot, overwrite: bool) -> ApplicationResult<()> {
        if !overwrite && self.fs.exists(path) {
            return Err(ApplicationError::SnapshotExists(path.to_path_buf()));
        }
        let content = snapshot.to_toml()?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create directory for", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write snapshot", path)?;
        debug!("save: wrote {} locations", snapshot.locations.len());
        Ok(())
    }
}
