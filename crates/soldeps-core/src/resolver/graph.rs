//! Breadth-first traversal of the import graph.

use super::{ResolvedFile, Resolver};
use crate::error::ResolverError;
use crate::imports::scan_imports;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolve `entries` and everything they transitively import.
///
/// Files appear in the result once, in first-discovery order. The first
/// resolution failure aborts the walk.
pub async fn walk_imports(
    resolver: &mut Resolver,
    entries: &[PathBuf],
) -> Result<Vec<Arc<ResolvedFile>>, ResolverError> {
    let mut ordered: Vec<Arc<ResolvedFile>> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<Arc<ResolvedFile>> = VecDeque::new();

    for entry in entries {
        let file = resolver.resolve_project_file(entry).await?;
        if seen.insert(file.source_name().to_string()) {
            queue.push_back(Arc::clone(&file));
            ordered.push(file);
        }
    }

    while let Some(file) = queue.pop_front() {
        for import in scan_imports(file.content()) {
            let resolved = resolver.resolve_import(&file, &import.raw).await?;
            if seen.insert(resolved.source_name().to_string()) {
                queue.push_back(Arc::clone(&resolved));
                ordered.push(resolved);
            }
        }
    }

    Ok(ordered)
}
