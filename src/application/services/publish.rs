//! Publish service
//!
//! Copies generated payloads into the static site directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::infrastructure::traits::FileSystem;

/// Outcome of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub target: PathBuf,
    pub files: usize,
}

/// Service mirroring `<data_dir>` into `<docs_dir>/data`.
pub struct PublishService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl PublishService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Replace `<docs_dir>/data` with a fresh copy of the data directory.
    ///
    /// Returns `None` when there is no data directory to publish.
    pub fn publish(&self, project_dir: &Path) -> ApplicationResult<Option<PublishReport>> {
        let source = self.settings.data_path(project_dir);
        let docs = self.settings.docs_path(project_dir);
        let target = docs.join("data");
        debug!(
            "publish: source={} target={}",
            source.display(),
            target.display()
        );

        if !self.fs.is_dir(&source) {
            debug!("publish: nothing to publish");
            return Ok(None);
        }

        let source_abs = self
            .fs
            .canonicalize(&source)
            .with_path_context("resolve data directory", &source)?;
        let target_abs = self.resolve(&target)?;
        if target_abs.starts_with(&source_abs) || source_abs.starts_with(&target_abs) {
            return Err(ApplicationError::Config {
                message: format!(
                    "publish target {} overlaps data directory {}",
                    target_abs.display(),
                    source_abs.display()
                ),
            });
        }

        self.fs
            .create_dir_all(&docs)
            .with_path_context("create docs directory", &docs)?;
        if self.fs.exists(&target) {
            self.fs
                .remove_dir_all(&target)
                .with_path_context("remove previous copy", &target)?;
        }
        let files = self
            .fs
            .copy_dir(&source, &target)
            .with_path_context("copy data", &source)?;

        Ok(Some(PublishReport { target, files }))
    }

    /// Canonical form of a path that may not exist yet: the deepest existing
    /// ancestor is canonicalized and the missing tail appended.
    fn resolve(&self, path: &Path) -> ApplicationResult<PathBuf> {
        let mut missing = Vec::new();
        let mut current = path;
        loop {
            if self.fs.exists(current) {
                let mut resolved = self
                    .fs
                    .canonicalize(current)
                    .with_path_context("resolve path", current)?;
                resolved.extend(missing.iter().rev().copied());
                return Ok(resolved);
            }
            match (current.file_name(), current.parent()) {
                (Some(name), Some(parent)) if !parent.as_os_str().is_empty() => {
                    missing.push(name);
                    current = parent;
                }
                _ => return Ok(path.to_path_buf()),
            }
        }
    }
}
