//! Storage path resolution and workspace root detection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::config::{DEFAULT_LEGACY_DIR, TodoConfig};

/// Markers that identify a workspace root when walking up from a directory.
pub const ROOT_MARKERS: &[&str] = &[".git", DEFAULT_LEGACY_DIR];

/// Maps a workspace root to the directory holding its project-scoped files.
pub trait PathResolver {
    /// Storage directory for `workspace`. Implementations create it if missing.
    fn project_dir(&self, workspace: &Path) -> Result<PathBuf>;
}

/// Stores each workspace under `<data_dir>/projects/<name>-<hash>/`.
#[derive(Debug, Clone)]
pub struct ProjectPathResolver {
    data_dir: PathBuf,
}

impl ProjectPathResolver {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `None` when the configuration has no data directory.
    pub fn from_config(cfg: &TodoConfig) -> Option<Self> {
        cfg.data_dir.clone().map(Self::new)
    }
}

impl PathResolver for ProjectPathResolver {
    fn project_dir(&self, workspace: &Path) -> Result<PathBuf> {
        let canonical = workspace
            .canonicalize()
            .with_context(|| format!("canonicalize workspace {}", workspace.display()))?;
        let dir = self
            .data_dir
            .join("projects")
            .join(project_key(&canonical));
        fs::create_dir_all(&dir)
            .with_context(|| format!("create directory {}", dir.display()))?;
        Ok(dir)
    }
}

/// `<name>-<first 12 hex chars of sha256(path)>` for a canonical workspace path.
pub fn project_key(canonical: &Path) -> String {
    let name = canonical
        .file_name()
        .map(|name| sanitize(&name.to_string_lossy()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "root".to_string());
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}-{}", name, &digest[..12])
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolve the todo file for `workspace`.
///
/// Falls back to the configured legacy path when no resolver is available
/// or it fails. The fallback is logged, never fatal.
pub fn resolve_todo_path(
    workspace: &Path,
    cfg: &TodoConfig,
    resolver: Option<&dyn PathResolver>,
) -> PathBuf {
    let legacy = cfg.legacy_todo_path(workspace);
    let Some(resolver) = resolver else {
        warn!(path = %legacy.display(), "no project storage available, using legacy path");
        return legacy;
    };
    match resolver.project_dir(workspace) {
        Ok(dir) => {
            let path = dir.join(&cfg.file_name);
            debug!(path = %path.display(), "resolved project todo path");
            path
        }
        Err(err) => {
            let error = format!("{err:#}");
            warn!(
                %error,
                path = %legacy.display(),
                "project path resolution failed, using legacy path"
            );
            legacy
        }
    }
}

/// Walk up from `start` to the nearest directory containing a root marker.
///
/// A `.loom` directory that is the data directory itself (e.g. `~/.loom`)
/// does not count. Returns `start` when no marker is found.
pub fn find_workspace_root(start: &Path, data_dir: Option<&Path>) -> PathBuf {
    start
        .ancestors()
        .find(|dir| {
            ROOT_MARKERS.iter().any(|marker| {
                let candidate = dir.join(marker);
                candidate.exists() && data_dir != Some(candidate.as_path())
            })
        })
        .map(Path::to_path_buf)
        .unwrap_or_else(|| start.to_path_buf())
}
