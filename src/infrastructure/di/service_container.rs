//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{LocationHierarchy, SnapshotService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Snapshot storage over the injected filesystem
    pub snapshots: SnapshotService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            snapshots: SnapshotService::new(fs),
        }
    }

    /// Load the configured snapshot into a fresh hierarchy.
    pub fn load_hierarchy(&self) -> ApplicationResult<LocationHierarchy> {
        let snapshot = self.snapshots.load(&self.settings.snapshot)?;
        LocationHierarchy::from_snapshot(snapshot, self.settings.expand_roots)
    }
}
