//! Node-style package manifest lookup.
//!
//! Walks the parent chain looking for `node_modules/<name>/package.json`,
//! the same traversal node performs for bare specifiers. The hit is
//! canonicalized so links out of `node_modules` (workspace links, hoisted
//! packages) classify by their real location.

use crate::manifest::MANIFEST_FILE_NAME;
use soldeps_util::fs;
use std::path::{Path, PathBuf};

/// Locate the manifest of `package_name`, starting the walk at `from_dir`.
///
/// Returns `None` when no `node_modules` on the parent chain contains the
/// package.
pub async fn locate_manifest(package_name: &str, from_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(from_dir);

    while let Some(dir) = current {
        let candidate = dir
            .join("node_modules")
            .join(package_name)
            .join(MANIFEST_FILE_NAME);

        if fs::exists(&candidate).await {
            return Some(fs::real_path(&candidate).await.unwrap_or(candidate));
        }

        current = dir.parent();
    }

    None
}
