#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

pub mod error;
pub mod imports;
pub mod manifest;
pub mod npm;
pub mod paths;
pub mod remapping;
pub mod resolver;

pub use error::ResolverError;
pub use imports::{scan_imports, ImportSpec};
pub use manifest::{PackageManifest, MANIFEST_FILE_NAME};
pub use remapping::{Remapping, UserRemapping};
pub use resolver::{
    walk_imports, Dependency, Package, PackageFile, ProjectFile, ResolvedFile, Resolver,
    CONSOLE_LOG_IMPORT, LOCAL_VERSION,
};
