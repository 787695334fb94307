//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/atlas/atlas.toml`
//! 3. Local config: `<project_dir>/.atlas.toml`
//! 4. Environment variables: `ATLAS_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{BranchSweep, PartitionOptions, RadialLayout, RingAllocator, DEFAULT_RING_CAPACITY};

/// Layout tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutSettings {
    /// Siblings per ring before a new ring is opened
    pub ring_capacity: usize,
    /// Insert line breaks into display labels
    pub multiline_labels: bool,
    /// Angular extent of a branch inside its own payload
    pub branch_sweep: BranchSweep,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            ring_capacity: DEFAULT_RING_CAPACITY,
            multiline_labels: true,
            branch_sweep: BranchSweep::Full,
        }
    }
}

/// Raw layout settings for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutSettings {
    pub ring_capacity: Option<usize>,
    pub multiline_labels: Option<bool>,
    pub branch_sweep: Option<BranchSweep>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub master_file: Option<String>,
    pub docs_dir: Option<PathBuf>,
    pub child_url_prefix: Option<String>,
    pub layout: RawLayoutSettings,
}

impl LayoutSettings {
    fn merge(&self, overlay: &RawLayoutSettings) -> Self {
        Self {
            ring_capacity: overlay.ring_capacity.unwrap_or(self.ring_capacity),
            multiline_labels: overlay.multiline_labels.unwrap_or(self.multiline_labels),
            branch_sweep: overlay.branch_sweep.unwrap_or(self.branch_sweep),
        }
    }
}

/// Unified configuration for atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the taxonomy and the generated payloads (default: data)
    pub data_dir: PathBuf,
    /// Taxonomy file name inside `data_dir` (default: master.json)
    pub master_file: String,
    /// Static site directory that receives a copy of `data_dir` (default: docs)
    pub docs_dir: PathBuf,
    /// Directory part of `childUrl` links in the root payload (default: data)
    pub child_url_prefix: String,
    pub layout: LayoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            master_file: "master.json".into(),
            docs_dir: PathBuf::from("docs"),
            child_url_prefix: "data".into(),
            layout: LayoutSettings::default(),
        }
    }
}

/// Get the XDG config directory for atlas.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "atlas").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("atlas.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".atlas.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        self.data_dir = expand_path(&self.data_dir);
        self.docs_dir = expand_path(&self.docs_dir);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            master_file: overlay
                .master_file
                .clone()
                .unwrap_or_else(|| self.master_file.clone()),
            docs_dir: overlay
                .docs_dir
                .clone()
                .unwrap_or_else(|| self.docs_dir.clone()),
            child_url_prefix: overlay
                .child_url_prefix
                .clone()
                .unwrap_or_else(|| self.child_url_prefix.clone()),
            layout: self.layout.merge(&overlay.layout),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/atlas/atlas.toml`
    /// 3. Local config: `<project_dir>/.atlas.toml`
    /// 4. Environment variables: `ATLAS_*` prefix, `__` between sections
    ///    (e.g. `ATLAS_LAYOUT__RING_CAPACITY=8`)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(project) = project_dir {
            let local_path = project_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply ATLAS_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_env_source(settings, env_source())
    }

    fn apply_env_source(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("master_file") {
            settings.master_file = val;
        }
        if let Ok(val) = config.get_string("docs_dir") {
            settings.docs_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("child_url_prefix") {
            settings.child_url_prefix = val;
        }
        if let Ok(val) = config.get_string("layout.ring_capacity") {
            settings.layout.ring_capacity = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("ATLAS_LAYOUT__RING_CAPACITY={val}: {e}"),
            })?;
        }
        match config.get_bool("layout.multiline_labels") {
            Ok(val) => settings.layout.multiline_labels = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => {
                return Err(ApplicationError::Config {
                    message: format!("ATLAS_LAYOUT__MULTILINE_LABELS: {e}"),
                })
            }
        }
        if let Ok(val) = config.get_string("layout.branch_sweep") {
            settings.layout.branch_sweep = parse_branch_sweep(&val)?;
        }

        Ok(settings)
    }

    /// Reject values the layout cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.layout.ring_capacity == 0 {
            return Err(ApplicationError::Config {
                message: "layout.ring_capacity must be at least 1".into(),
            });
        }
        if self.master_file.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "master_file must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Data directory resolved against the project directory.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Taxonomy document location.
    pub fn master_path(&self, project_dir: &Path) -> PathBuf {
        self.data_path(project_dir).join(&self.master_file)
    }

    /// Static site directory resolved against the project directory.
    pub fn docs_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.docs_dir)
    }

    /// Layout engine configured from these settings.
    pub fn layout_engine(&self) -> Result<RadialLayout, ApplicationError> {
        let rings = RingAllocator::new(self.layout.ring_capacity)?;
        Ok(RadialLayout::new(rings, self.layout.multiline_labels))
    }

    pub fn partition_options(&self) -> PartitionOptions {
        PartitionOptions {
            child_url_prefix: self.child_url_prefix.clone(),
            branch_sweep: self.layout.branch_sweep,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# atlas configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/atlas/atlas.toml   (your baseline)
#   Local:  <project_dir>/.atlas.toml    (project-specific values)
#   Env:    ATLAS_* environment variables (explicit overrides,
#           e.g. ATLAS_LAYOUT__RING_CAPACITY=8)

# Directory with master.json and the generated payloads
# data_dir = "data"

# Taxonomy file inside data_dir
# master_file = "master.json"

# Static site directory; `atlas publish` copies data_dir to <docs_dir>/data
# docs_dir = "docs"

# Directory part of childUrl links in root.json
# child_url_prefix = "data"

[layout]
# Siblings per ring before spilling into the next concentric ring
# ring_capacity = 6

# Break long labels at bullets, colons and slashes
# multiline_labels = true

# Branch payload sweep: "full" (own circle) or "share" (slice of the master circle)
# branch_sweep = "full"
"#
        .to_string()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("ATLAS")
        .prefix_separator("_")
        .separator("__")
}

fn parse_branch_sweep(value: &str) -> Result<BranchSweep, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "full" => Ok(BranchSweep::Full),
        "share" => Ok(BranchSweep::Share),
        other => Err(ApplicationError::Config {
            message: format!("unknown branch_sweep '{other}' (expected 'full' or 'share')"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
