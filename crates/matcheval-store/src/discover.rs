//! Collection discovery.
//!
//! Source collections, ledgers, and vocabulary files are all "a directory
//! of `;`-delimited CSV files"; this module finds them and fixes their
//! order. Ordering matters: the queue interleaves collections
//! position-by-position, so file listing must be as deterministic as the
//! selector itself.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use matcheval_core::queue::compare_collection_names;

/// Collection name for a file path: the file stem. Ledger files mirror
/// source files by name, so the stem is the join key between the two.
pub fn collection_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Recursively lists `.csv` files under `dir`, ordered by the collection
/// ordering the selector uses. A missing directory yields an empty list —
/// for ledgers that is the normal state before the first rating arrives.
pub fn discover_collections(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        warn!(dir = %dir.display(), "directory does not exist, treating as empty");
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort_by(|a, b| compare_collection_names(&collection_name(a), &collection_name(b)));
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list directory: {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            files.push(path);
        }
    }
    Ok(())
}
