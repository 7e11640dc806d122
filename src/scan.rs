//! Filesystem scan
//!
//! Walks the root directories and turns every regular file into an `Item`
//! (path + size). Sizes are sampled once here; the sorter never stats files.

use crate::error::ApiError;
use crate::types::Item;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scan configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Descend into subdirectories. When off only files directly inside a root are taken.
    #[serde(default)]
    pub recursive: bool,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_symlinks: bool,
}

/// Files found by a scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Files in walk order (roots in the given order, entries sorted by name)
    pub items: Vec<Item>,
    /// Entries that could not be read
    pub skipped: usize,
}

impl ScanOutcome {
    pub fn total_bytes(&self) -> i64 {
        self.items.iter().map(|item| item.size).sum()
    }
}

/// Resolve the roots to scan.
///
/// An empty list means the current working directory. Roots that cannot be
/// resolved are logged and dropped; if none remain the scan cannot start.
pub fn resolve_roots(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ApiError> {
    if paths.is_empty() {
        let cwd = std::env::current_dir().map_err(|e| {
            ApiError::NoPathResolved(format!("No path specified and cwd unavailable: {}", e))
        })?;
        info!(cwd = %cwd.display(), "No path specified, using cwd");
        return Ok(vec![cwd]);
    }

    let mut roots = Vec::with_capacity(paths.len());
    for path in paths {
        match dunce::canonicalize(path) {
            Ok(root) => {
                info!(path = %root.display(), "Using root path");
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
            Err(e) => warn!(path = %path.display(), "Skipping unresolvable path: {}", e),
        }
    }

    if roots.is_empty() {
        let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(ApiError::NoPathResolved(format!(
            "none of the given paths exist: {}",
            listed.join(", ")
        )));
    }
    Ok(roots)
}

/// Walk every root and collect its files.
pub fn scan_roots(roots: &[PathBuf], config: &ScanConfig) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for root in roots {
        scan_root(root, config, &mut outcome);
    }
    info!(
        files = outcome.items.len(),
        bytes = outcome.total_bytes(),
        skipped = outcome.skipped,
        "Scan complete"
    );
    outcome
}

fn scan_root(root: &Path, config: &ScanConfig, outcome: &mut ScanOutcome) {
    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .max_depth(max_depth)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                outcome.skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let size = match entry.metadata() {
            Ok(metadata) => i64::try_from(metadata.len()).unwrap_or(i64::MAX),
            Err(e) => {
                warn!(path = %entry.path().display(), "Skipping file without metadata: {}", e);
                outcome.skipped += 1;
                continue;
            }
        };
        let id = entry.path().to_string_lossy().into_owned();
        debug!(path = %id, size, "Adding file to list");
        outcome.items.push(Item { id, size });
    }
}
