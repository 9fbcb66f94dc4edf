//! The resolution engine.
//!
//! An import is first normalized into a *direct import* (relative `./`/`../`
//! segments joined onto the importing file's directory), then routed:
//!
//! - project-local paths resolve against the project root;
//! - user remappings rewrite project-origin imports, either to another
//!   project path or into a validated package;
//! - package files resolve their own paths against their package root;
//! - everything else goes through the node-style `node_modules` walk.
//!
//! The cache and the dependency map are only written after every
//! validation and read for a resolution succeeded, so a failed or
//! cancelled resolution leaves no trace.

use super::cache::FileCache;
use super::dependency_map::{DependencyMap, Origin};
use super::{Dependency, Package, PackageFile, ProjectFile, ResolvedFile, LOCAL_VERSION};
use crate::error::ResolverError;
use crate::manifest::PackageManifest;
use crate::npm::{classify_manifest, locate_manifest, parse_npm_import, PackageLocation};
use crate::paths;
use crate::remapping::{
    apply_remapping, emit_remappings, select_best_remapping, validate_remapping, Remapping,
    UserRemapping,
};
use soldeps_util::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Always resolved through npm, even when a local `hardhat/` directory
/// exists.
pub const CONSOLE_LOG_IMPORT: &str = "hardhat/console.sol";

/// Resolves import strings to files and tracks discovered dependencies.
///
/// Not thread-shared; callers serialize requests.
#[derive(Debug)]
pub struct Resolver {
    project_root: PathBuf,
    working_directory: PathBuf,
    user_remappings: Vec<UserRemapping>,
    cache: FileCache,
    dependencies: DependencyMap,
}

impl Resolver {
    /// Create a resolver, validating every user remapping against the
    /// project layout.
    pub async fn new(
        project_root: PathBuf,
        user_remapping_strings: &[String],
        working_directory: Option<PathBuf>,
    ) -> Result<Self, ResolverError> {
        let working_directory = match working_directory {
            Some(dir) => fs::real_path(&dir).await.unwrap_or(dir),
            None => std::env::current_dir().unwrap_or_else(|_| project_root.clone()),
        };

        let mut user_remappings = Vec::with_capacity(user_remapping_strings.len());
        for raw in user_remapping_strings {
            user_remappings.push(validate_remapping(raw, &project_root).await?);
        }

        Ok(Self {
            project_root,
            working_directory,
            user_remappings,
            cache: FileCache::default(),
            dependencies: DependencyMap::default(),
        })
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Shorten an absolute path for user-facing output.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        paths::display_path(&self.working_directory, path)
    }

    /// The remapping table an external compiler consumes to reproduce this
    /// resolver's decisions.
    #[must_use]
    pub fn remappings(&self) -> Vec<Remapping> {
        emit_remappings(&self.user_remappings, &self.dependencies)
    }

    /// Resolve an entry file given by absolute path.
    pub async fn resolve_project_file(
        &mut self,
        path: &Path,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        let Some(source_name) = paths::relative_source_name(&self.project_root, path) else {
            return Err(ResolverError::NotWithinProject {
                path: path.to_path_buf(),
                project_root: self.project_root.clone(),
            });
        };

        self.finish_project_file(source_name).await
    }

    /// Resolve one import string written in `from`.
    pub async fn resolve_import(
        &mut self,
        from: &ResolvedFile,
        import: &str,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        let direct = direct_import(from, import)?;
        match from {
            ResolvedFile::Project(file) => self.resolve_from_project_file(file, &direct).await,
            ResolvedFile::Package(file) => self.resolve_from_package_file(file, &direct).await,
        }
    }

    async fn resolve_from_project_file(
        &mut self,
        from: &ProjectFile,
        direct: &str,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        let selected = select_best_remapping(&self.user_remappings, &from.source_name, direct)
            .map(|r| {
                (
                    apply_remapping(r, direct),
                    r.target_package.clone(),
                    r.raw.clone(),
                )
            });

        if let Some((remapped, target_package, raw)) = selected {
            if let Some(package) = target_package {
                // The validated target starts with the package's root
                // source name, so the strip can only fail on a
                // miscomputed remapping.
                let Some(relative) = remapped
                    .strip_prefix(&package.root_source_name)
                    .map(ToString::to_string)
                else {
                    return Err(ResolverError::InvalidUserRemapping {
                        raw,
                        reason: "the target does not lie inside the resolved package"
                            .to_string(),
                    });
                };
                return self.finish_package_file(package, relative).await;
            }

            return if is_local_import(&self.project_root, &remapped).await {
                self.finish_project_file(remapped).await
            } else {
                Err(ResolverError::RemapNotLocal {
                    remapping: raw,
                    import: direct.to_string(),
                    remapped,
                })
            };
        }

        if is_local_import(&self.project_root, direct).await {
            return self.finish_project_file(direct.to_string()).await;
        }

        let base_dir = self.project_root.clone();
        self.resolve_import_through_npm(Origin::Project, &base_dir, direct)
            .await
    }

    async fn resolve_from_package_file(
        &mut self,
        from: &PackageFile,
        direct: &str,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        let package = Arc::clone(&from.package);

        if let Some(relative) = direct.strip_prefix(&package.root_source_name) {
            let relative = relative.to_string();
            return self.finish_package_file(package, relative).await;
        }

        if is_local_import(&package.root_path, direct).await {
            return self.finish_package_file(package, direct.to_string()).await;
        }

        self.resolve_import_through_npm(
            Origin::Package(package.root_source_name.clone()),
            &package.root_path,
            direct,
        )
        .await
    }

    /// Cross-package resolution through the node-style layout.
    async fn resolve_import_through_npm(
        &mut self,
        origin: Origin,
        base_dir: &Path,
        direct: &str,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        let Some(parsed) = parse_npm_import(direct) else {
            return Err(ResolverError::MalformedNpmImport {
                import: direct.to_string(),
            });
        };
        let package_name = parsed.package.to_string();
        let path_in_package = parsed.path.to_string();

        let dependency = match self.dependencies.get(&origin, &package_name) {
            Some(dependency) => dependency.clone(),
            None => {
                self.discover_dependency(&origin, base_dir, &package_name)
                    .await?
            }
        };

        let file = match &dependency {
            // An auto-generated remapping lets a package import back into
            // the project.
            Dependency::Project => self.finish_project_file(path_in_package).await?,
            Dependency::Package(package) => {
                self.finish_package_file(Arc::clone(package), path_in_package)
                    .await?
            }
        };

        self.dependencies.record(origin, package_name, dependency);
        Ok(file)
    }

    /// Locate and classify a package seen for the first time from
    /// `origin`. The result is not recorded here; the caller records it
    /// after file validation succeeds.
    async fn discover_dependency(
        &self,
        origin: &Origin,
        base_dir: &Path,
        package_name: &str,
    ) -> Result<Dependency, ResolverError> {
        let Some(manifest_path) = locate_manifest(package_name, base_dir).await else {
            return Err(ResolverError::DependencyMissing {
                origin: origin.root_source_name().map(ToString::to_string),
                package: package_name.to_string(),
            });
        };

        match classify_manifest(&manifest_path, &self.project_root) {
            PackageLocation::Project => Ok(Dependency::Project),
            PackageLocation::MonorepoSibling => {
                let manifest = PackageManifest::read(&manifest_path).await?;
                Ok(Dependency::Package(Arc::new(dependency_package(
                    manifest,
                    package_name,
                    LOCAL_VERSION.to_string(),
                    &manifest_path,
                ))))
            }
            PackageLocation::Installed => {
                let manifest = PackageManifest::read(&manifest_path).await?;
                let version = manifest
                    .version
                    .clone()
                    .unwrap_or_else(|| "0.0.0".to_string());
                Ok(Dependency::Package(Arc::new(dependency_package(
                    manifest,
                    package_name,
                    version,
                    &manifest_path,
                ))))
            }
        }
    }

    /// Cache-or-build a project file. The cache is written last.
    async fn finish_project_file(
        &mut self,
        source_name: String,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        if let Some(hit) = self.cache.get(&source_name) {
            return Ok(hit);
        }

        let true_cased = fs::true_case(&self.project_root, &source_name)
            .await
            .map_err(|e| ResolverError::io(&self.project_root, e))?;

        match true_cased {
            None => Err(ResolverError::ProjectFileMissing {
                path: self.project_root.join(&source_name),
            }),
            Some(correct) if correct != source_name => Err(ResolverError::IncorrectCasing {
                requested: source_name,
                correct,
            }),
            Some(_) => {
                let path = self.project_root.join(&source_name);
                let content = fs::read_utf8(&path)
                    .await
                    .map_err(|e| ResolverError::io(&path, e))?;
                Ok(self.cache.insert(Arc::new(ResolvedFile::Project(
                    ProjectFile {
                        source_name,
                        path,
                        content,
                    },
                ))))
            }
        }
    }

    /// Cache-or-build a file of `package` at `relative`. The cache is
    /// written last.
    async fn finish_package_file(
        &mut self,
        package: Arc<Package>,
        relative: String,
    ) -> Result<Arc<ResolvedFile>, ResolverError> {
        let source_name = format!("{}{relative}", package.root_source_name);
        if let Some(hit) = self.cache.get(&source_name) {
            return Ok(hit);
        }

        let true_cased = fs::true_case(&package.root_path, &relative)
            .await
            .map_err(|e| ResolverError::io(&package.root_path, e))?;

        match true_cased {
            None => Err(ResolverError::FileMissingInPackage {
                source_name,
                package: package.name.clone(),
            }),
            Some(correct) if correct != relative => Err(ResolverError::IncorrectCasing {
                requested: source_name,
                correct: format!("{}{correct}", package.root_source_name),
            }),
            Some(_) => {
                let path = package.root_path.join(&relative);
                let content = fs::read_utf8(&path)
                    .await
                    .map_err(|e| ResolverError::io(&path, e))?;
                Ok(self.cache.insert(Arc::new(ResolvedFile::Package(
                    PackageFile {
                        source_name,
                        path,
                        content,
                        package,
                    },
                ))))
            }
        }
    }
}

/// Normalize an import string into a direct import.
fn direct_import(from: &ResolvedFile, import: &str) -> Result<String, ResolverError> {
    if !import.starts_with("./") && !import.starts_with("../") {
        return Ok(import.to_string());
    }

    let direct = paths::join(paths::dirname(from.source_name()), import);

    match from {
        ResolvedFile::Project(_) => {
            if direct.starts_with("../") {
                return Err(ResolverError::ImportOutsideProject {
                    from: from.source_name().to_string(),
                    import: import.to_string(),
                });
            }
        }
        ResolvedFile::Package(file) => {
            if !direct.starts_with(&file.package.root_source_name) {
                return Err(ResolverError::ImportOutsidePackage {
                    from: from.source_name().to_string(),
                    import: import.to_string(),
                });
            }
        }
    }

    Ok(direct)
}

/// A direct import is local when its first segment exists in `root`.
///
/// Single-segment imports are always local; the console-log contract is
/// never local.
async fn is_local_import(root: &Path, direct: &str) -> bool {
    if direct == CONSOLE_LOG_IMPORT {
        return false;
    }

    match direct.split_once('/') {
        None => true,
        Some((first, _)) => fs::exists(&root.join(first)).await,
    }
}

fn dependency_package(
    manifest: PackageManifest,
    requested_name: &str,
    version: String,
    manifest_path: &Path,
) -> Package {
    let name = manifest
        .name
        .unwrap_or_else(|| requested_name.to_string());
    let root = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Package::new(name, version, root)
}
