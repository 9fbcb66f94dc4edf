use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the resolver.
///
/// Every variant is non-retriable within a resolver instance. No cache or
/// dependency-map state is committed when one of these is returned.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid remapping `{raw}`: {reason}")]
    InvalidUserRemapping { raw: String, reason: String },

    #[error(
        "Invalid remapping `{raw}`: the target must look like \
         `npm/<package>@<version>/<path>` where <version> is `local` or \
         `<major>.<minor>.<patch>`"
    )]
    InvalidNpmTarget { raw: String },

    #[error("Invalid remapping `{raw}`: package `{package}` is not installed")]
    PackageNotInstalled { raw: String, package: String },

    #[error(
        "Invalid remapping `{raw}`: the target resolves to the project itself; \
         use a project-relative target instead"
    )]
    RemapIntoProject { raw: String },

    #[error(
        "Invalid remapping `{raw}`: `{package}` is a monorepo package, so its \
         version must be the literal `local`"
    )]
    MonorepoVersionMismatch { raw: String, package: String },

    #[error(
        "Invalid remapping `{raw}`: `{package}` is installed with version \
         {installed}, not {declared}"
    )]
    PackageVersionMismatch {
        raw: String,
        package: String,
        installed: String,
        declared: String,
    },

    #[error("File {} is not inside the project rooted at {}", .path.display(), .project_root.display())]
    NotWithinProject { path: PathBuf, project_root: PathBuf },

    #[error("Project file {} does not exist", .path.display())]
    ProjectFileMissing { path: PathBuf },

    #[error("`{requested}` does not match the filesystem casing `{correct}`")]
    IncorrectCasing { requested: String, correct: String },

    #[error("Import `{import}` from `{from}` reaches outside the project")]
    ImportOutsideProject { from: String, import: String },

    #[error("Import `{import}` from `{from}` reaches outside its package")]
    ImportOutsidePackage { from: String, import: String },

    #[error(
        "Remapping `{remapping}` turns `{import}` into `{remapped}`, which is \
         not a project path; use an `npm/` target to remap into a package"
    )]
    RemapNotLocal {
        remapping: String,
        import: String,
        remapped: String,
    },

    #[error("Import `{import}` is not a valid npm-style import")]
    MalformedNpmImport { import: String },

    #[error(
        "Package `{package}` is not installed (required by {})",
        .origin.as_ref().map_or_else(|| "the project".to_string(), |o| format!("package `{o}`"))
    )]
    DependencyMissing {
        /// Root source name of the requesting package, or `None` when the
        /// project itself made the request.
        origin: Option<String>,
        package: String,
    },

    #[error("File `{source_name}` does not exist in package `{package}`")]
    FileMissingInPackage {
        source_name: String,
        package: String,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ResolverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
