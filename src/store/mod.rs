//! Extension store discovery and manifest resolution.
//!
//! A store is a directory with one subdirectory per extension identifier;
//! each of those holds one subdirectory per installed version, and each
//! version directory may contain a `manifest.json`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};

/// How the newest installed version is selected among version directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPolicy {
    /// Most recent modification timestamp. Matches browser behavior closely
    /// but is a heuristic: backup/restore tools can rewrite timestamps
    /// without changing content.
    #[default]
    Mtime,
    /// Descending dotted-numeric comparison of the directory name
    /// (Chrome-style `1.2.3.4_0`, install suffix ignored).
    Version,
}

impl VersionPolicy {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mtime" | "modified" => Some(Self::Mtime),
            "version" => Some(Self::Version),
            _ => None,
        }
    }
}

/// Return the first candidate that exists and is a directory.
///
/// `None` is a normal outcome: no browser installed, or an atypical
/// install location.
pub fn locate_store(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_dir()).cloned()
}

/// List extension identifiers: the names of the store's immediate
/// subdirectories, sorted so discovery order is deterministic.
pub fn list_extension_ids(store: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(store).map_err(|source| GuardError::StoreUnreadable {
        path: store.to_path_buf(),
        source,
    })?;

    let mut ids: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    ids.sort();
    Ok(ids)
}

/// Resolve the manifest of an extension's newest installed version.
///
/// Version directories are ordered newest-first per `policy`; the first one
/// containing a `manifest.json` wins. Returns `None` when the extension has
/// no version directories or none contains a manifest; placeholders and
/// mid-uninstall entries are expected in real stores.
pub fn resolve_manifest(store: &Path, extension_id: &str, policy: VersionPolicy) -> Option<PathBuf> {
    let ext_dir = store.join(extension_id);
    let entries = std::fs::read_dir(&ext_dir).ok()?;

    let mut versions: Vec<VersionDir> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| {
            let mtime = e
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            VersionDir {
                path: e.path(),
                name: e.file_name().to_string_lossy().into_owned(),
                mtime,
            }
        })
        .collect();

    if versions.is_empty() {
        tracing::debug!(extension_id, "no version directories, skipping");
        return None;
    }

    order_newest_first(&mut versions, policy);

    for version in &versions {
        let manifest = version.path.join("manifest.json");
        if manifest.is_file() {
            return Some(manifest);
        }
    }

    tracing::debug!(extension_id, "no manifest in any version directory, skipping");
    None
}

struct VersionDir {
    path: PathBuf,
    name: String,
    mtime: SystemTime,
}

fn order_newest_first(versions: &mut [VersionDir], policy: VersionPolicy) {
    match policy {
        // Ties broken by descending name so the order is deterministic.
        VersionPolicy::Mtime => {
            versions.sort_by(|a, b| b.mtime.cmp(&a.mtime).then(b.name.cmp(&a.name)))
        }
        VersionPolicy::Version => versions.sort_by(|a, b| {
            version_components(&b.name)
                .cmp(&version_components(&a.name))
                .then(b.name.cmp(&a.name))
        }),
    }
}

/// Numeric components of a Chrome-style version directory name.
///
/// `"1.38.2_0"` → `[1, 38, 2]`. Non-numeric names yield an empty vector and
/// sort below every parsable one.
fn version_components(name: &str) -> Vec<u64> {
    let base = name.split('_').next().unwrap_or(name);
    let parsed: Option<Vec<u64>> = base.split('.').map(|c| c.parse::<u64>().ok()).collect();
    parsed.unwrap_or_default()
}
