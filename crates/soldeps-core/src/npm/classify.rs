//! Classification of a located package manifest.

use std::path::Path;

/// Where a located manifest lives relative to the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageLocation {
    /// The project's own manifest.
    Project,
    /// A package outside `node_modules` and outside the project root. Its
    /// version is forced to the literal `local`.
    MonorepoSibling,
    /// A package under some `node_modules` directory. Its version comes
    /// from the manifest.
    Installed,
}

/// Classify `manifest_path` against `project_root`.
#[must_use]
pub fn classify_manifest(manifest_path: &Path, project_root: &Path) -> PackageLocation {
    let in_node_modules = manifest_path
        .components()
        .any(|c| c.as_os_str() == "node_modules");

    if in_node_modules {
        PackageLocation::Installed
    } else if manifest_path.starts_with(project_root) {
        PackageLocation::Project
    } else {
        PackageLocation::MonorepoSibling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_project_manifest() {
        assert_eq!(
            classify_manifest(Path::new("/proj/package.json"), Path::new("/proj")),
            PackageLocation::Project
        );
    }

    #[test]
    fn test_classify_installed_package() {
        assert_eq!(
            classify_manifest(
                Path::new("/proj/node_modules/dep/package.json"),
                Path::new("/proj")
            ),
            PackageLocation::Installed
        );
    }

    #[test]
    fn test_classify_installed_outside_project() {
        assert_eq!(
            classify_manifest(
                Path::new("/mono/node_modules/dep/package.json"),
                Path::new("/mono/proj")
            ),
            PackageLocation::Installed
        );
    }

    #[test]
    fn test_classify_monorepo_sibling() {
        assert_eq!(
            classify_manifest(
                Path::new("/mono/sib/package.json"),
                Path::new("/mono/proj")
            ),
            PackageLocation::MonorepoSibling
        );
    }
}
