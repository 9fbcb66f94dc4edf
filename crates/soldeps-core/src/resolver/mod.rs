//! The resolution engine and its bookkeeping.

mod cache;
mod dependency_map;
mod engine;
mod graph;

pub use dependency_map::{DependencyMap, Origin};
pub use engine::{Resolver, CONSOLE_LOG_IMPORT};
pub use graph::walk_imports;

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The version given to monorepo packages in place of a manifest version.
pub const LOCAL_VERSION: &str = "local";

/// A package discovered through the node-style layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Absolute directory containing the package's manifest.
    pub root_path: PathBuf,
    /// `npm/<name>@<version>/`, the prefix of every source name in the
    /// package.
    pub root_source_name: String,
}

impl Package {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>, root_path: PathBuf) -> Self {
        let name = name.into();
        let version = version.into();
        let root_source_name = format!("npm/{name}@{version}/");
        Self {
            name,
            version,
            root_path,
            root_source_name,
        }
    }
}

/// A file of the project itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Path from the project root, forward slashes.
    pub source_name: String,
    pub path: PathBuf,
    pub content: String,
}

/// A file belonging to a discovered package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    /// `npm/<name>@<version>/<path>`.
    pub source_name: String,
    pub path: PathBuf,
    pub content: String,
    pub package: Arc<Package>,
}

/// A fully resolved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFile {
    Project(ProjectFile),
    Package(PackageFile),
}

impl ResolvedFile {
    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            Self::Project(f) => &f.source_name,
            Self::Package(f) => &f.source_name,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Project(f) => &f.path,
            Self::Package(f) => &f.path,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Project(f) => &f.content,
            Self::Package(f) => &f.content,
        }
    }

    /// The owning package, when the file belongs to one.
    #[must_use]
    pub fn package(&self) -> Option<&Arc<Package>> {
        match self {
            Self::Project(_) => None,
            Self::Package(f) => Some(&f.package),
        }
    }
}

/// What an imported package name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// The import leads back into the project.
    Project,
    Package(Arc<Package>),
}
