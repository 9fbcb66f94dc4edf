//! Resolved-file memoization.

use super::ResolvedFile;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Source-name keyed cache of resolved files.
///
/// Entries are append-only for a resolver's lifetime; the engine inserts
/// only after every validation and read for a resolution succeeded.
#[derive(Debug, Default)]
pub struct FileCache {
    files: FxHashMap<String, Arc<ResolvedFile>>,
}

impl FileCache {
    #[must_use]
    pub fn get(&self, source_name: &str) -> Option<Arc<ResolvedFile>> {
        self.files.get(source_name).cloned()
    }

    /// Insert a freshly built file, keyed on its source name.
    pub fn insert(&mut self, file: Arc<ResolvedFile>) -> Arc<ResolvedFile> {
        self.files
            .insert(file.source_name().to_string(), Arc::clone(&file));
        file
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ProjectFile;
    use std::path::PathBuf;

    fn project_file(source_name: &str) -> Arc<ResolvedFile> {
        Arc::new(ResolvedFile::Project(ProjectFile {
            source_name: source_name.to_string(),
            path: PathBuf::from("/p").join(source_name),
            content: String::new(),
        }))
    }

    #[test]
    fn test_get_after_insert_is_same_allocation() {
        let mut cache = FileCache::default();
        let inserted = cache.insert(project_file("contracts/A.sol"));

        let hit = cache.get("contracts/A.sol").unwrap();
        assert!(Arc::ptr_eq(&inserted, &hit));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_miss() {
        let cache = FileCache::default();
        assert!(cache.get("contracts/A.sol").is_none());
        assert!(cache.is_empty());
    }
}
