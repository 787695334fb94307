//! Atlas build service
//!
//! Reads the taxonomy, runs the radial layout and persists the root and
//! branch payloads as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{self, branch_file_name, AtlasLayout, TaxonomyNode, ROOT_FILE_NAME};
use crate::infrastructure::traits::FileSystem;

/// Outcome of a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Written payload files, root first, then branches in source order
    pub files: Vec<PathBuf>,
    /// Nodes in the taxonomy
    pub node_count: usize,
    /// Top-level branches (one payload each)
    pub branch_count: usize,
}

/// Service turning a taxonomy document into layout payloads.
pub struct AtlasService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl AtlasService {
    /// Create a new atlas service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Read and validate the taxonomy document.
    pub fn load_taxonomy(&self, path: &Path) -> ApplicationResult<TaxonomyNode> {
        debug!("load_taxonomy: path={}", path.display());
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read taxonomy", path)?;
        let taxonomy = TaxonomyNode::from_json(&content)?;
        debug!(
            "load_taxonomy: {} nodes, {} leaves",
            taxonomy.node_count(),
            taxonomy.leaf_count()
        );
        Ok(taxonomy)
    }

    /// Compute the root payload and all branch payloads.
    pub fn layout(&self, master: &TaxonomyNode) -> ApplicationResult<AtlasLayout> {
        let engine = self.settings.layout_engine()?;
        let layout = domain::partition(master, &engine, &self.settings.partition_options())?;
        debug!("layout: {} branch payloads", layout.branches.len());
        Ok(layout)
    }

    /// Serialize every payload, keyed by file name.
    ///
    /// Nothing is written here, so a serialization failure leaves no output.
    pub fn render(&self, layout: &AtlasLayout) -> ApplicationResult<Vec<(String, String)>> {
        let mut documents = Vec::with_capacity(layout.branches.len() + 1);
        documents.push((ROOT_FILE_NAME.to_string(), to_json(&layout.root, ROOT_FILE_NAME)?));
        for bundle in &layout.branches {
            let name = branch_file_name(&bundle.slug);
            let json = to_json(&bundle.payload, &name)?;
            documents.push((name, json));
        }
        Ok(documents)
    }

    /// Persist all payloads into `out_dir`.
    pub fn emit(&self, layout: &AtlasLayout, out_dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        let documents = self.render(layout)?;
        self.fs
            .create_dir_all(out_dir)
            .with_path_context("create output directory", out_dir)?;

        let mut written = Vec::with_capacity(documents.len());
        for (name, json) in documents {
            let path = out_dir.join(name);
            self.fs
                .write(&path, &json)
                .with_path_context("write payload", &path)?;
            debug!("emit: wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Full run: load, lay out and emit.
    ///
    /// # Arguments
    /// * `project_dir` - Base for relative settings paths
    /// * `input` - Taxonomy file, defaults to `<data_dir>/<master_file>`
    /// * `output` - Payload directory, defaults to `<data_dir>`
    pub fn build(
        &self,
        project_dir: &Path,
        input: Option<&Path>,
        output: Option<&Path>,
    ) -> ApplicationResult<BuildReport> {
        let input = input
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.master_path(project_dir));
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.data_path(project_dir));
        info!(
            "build: input={} output={}",
            input.display(),
            output.display()
        );

        let master = self.load_taxonomy(&input)?;
        let layout = self.layout(&master)?;
        let files = self.emit(&layout, &output)?;

        Ok(BuildReport {
            files,
            node_count: master.node_count(),
            branch_count: layout.branches.len(),
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T, name: &str) -> ApplicationResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ApplicationError::OperationFailed {
        context: format!("serialize {name}"),
        source: Box::new(e),
    })
}
