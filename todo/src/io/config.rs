//! Layered configuration (`config.toml`).
//!
//! Two optional layers are read and merged field by field:
//! 1. global: `<data_dir>/config.toml`
//! 2. project: `<workspace>/.loom/config.toml`
//!
//! Every layer field is optional so that "not set" never overwrites an
//! explicit value from an earlier layer, booleans included.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_LEGACY_DIR: &str = ".loom";
pub const DEFAULT_FILE_NAME: &str = "todo.json";

/// One configuration source. Missing fields defer to earlier layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigLayer {
    /// Base directory for project-scoped storage.
    pub data_dir: Option<PathBuf>,
    /// Directory under the workspace root used when no project dir resolves.
    pub legacy_dir: Option<String>,
    /// Todo document file name.
    pub file_name: Option<String>,
    /// Write via temp file + rename.
    pub atomic_write: Option<bool>,
}

impl ConfigLayer {
    /// Overlay `over` on top of `self`; only fields set in `over` win.
    pub fn merge(self, over: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            data_dir: over.data_dir.or(self.data_dir),
            legacy_dir: over.legacy_dir.or(self.legacy_dir),
            file_name: over.file_name.or(self.file_name),
            atomic_write: over.atomic_write.or(self.atomic_write),
        }
    }

    /// Fill defaults and validate.
    pub fn resolve(self) -> Result<TodoConfig> {
        let cfg = TodoConfig {
            data_dir: self.data_dir.or_else(default_data_dir),
            legacy_dir: self
                .legacy_dir
                .unwrap_or_else(|| DEFAULT_LEGACY_DIR.to_string()),
            file_name: self
                .file_name
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            atomic_write: self.atomic_write.unwrap_or(true),
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Effective configuration after layering and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// `None` when no home directory is known and nothing was configured.
    pub data_dir: Option<PathBuf>,
    pub legacy_dir: String,
    pub file_name: String,
    pub atomic_write: bool,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            legacy_dir: DEFAULT_LEGACY_DIR.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            atomic_write: true,
        }
    }
}

impl TodoConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_plain_name(&self.legacy_dir) {
            return Err(anyhow!(
                "legacy_dir must be a single directory name, got '{}'",
                self.legacy_dir
            ));
        }
        if !is_plain_name(&self.file_name) {
            return Err(anyhow!(
                "file_name must be a single file name, got '{}'",
                self.file_name
            ));
        }
        Ok(())
    }

    /// `<workspace>/<legacy_dir>/<file_name>`.
    pub fn legacy_todo_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.legacy_dir).join(&self.file_name)
    }
}

/// `~/.loom`, if a home directory is known.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_LEGACY_DIR))
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Load one layer from a TOML file. A missing file is an empty layer.
pub fn load_layer(path: &Path) -> Result<ConfigLayer> {
    if !path.exists() {
        return Ok(ConfigLayer::default());
    }
    debug!(path = %path.display(), "loading config layer");
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Load the effective configuration for `workspace`.
///
/// `overrides` is applied last (e.g. command-line flags).
pub fn load_config(workspace: &Path, overrides: ConfigLayer) -> Result<TodoConfig> {
    let global = match overrides.data_dir.clone().or_else(default_data_dir) {
        Some(dir) => load_layer(&dir.join(CONFIG_FILE_NAME))?,
        None => ConfigLayer::default(),
    };
    let project = load_layer(&workspace.join(DEFAULT_LEGACY_DIR).join(CONFIG_FILE_NAME))?;
    global.merge(project).merge(overrides).resolve()
}
