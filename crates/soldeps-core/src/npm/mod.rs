//! Node-style package discovery.

mod classify;
mod direct_import;
mod locate;

pub use classify::{classify_manifest, PackageLocation};
pub use direct_import::{is_valid_package_name, parse_npm_import, NpmImport};
pub use locate::locate_manifest;
