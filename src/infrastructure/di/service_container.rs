//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::{AtlasService, PublishService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services for one project directory.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Directory that relative settings paths are resolved against
    pub project_dir: PathBuf,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, project_dir: &Path) -> Self {
        Self::with_deps(settings, project_dir, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, project_dir: &Path, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            project_dir: project_dir.to_path_buf(),
        }
    }

    pub fn atlas_service(&self) -> AtlasService {
        AtlasService::new(Arc::clone(&self.fs), Arc::clone(&self.settings))
    }

    pub fn publish_service(&self) -> PublishService {
        PublishService::new(Arc::clone(&self.fs), Arc::clone(&self.settings))
    }
}
