//! Package manifest (`package.json`) reading.

use crate::error::ResolverError;
use serde::Deserialize;
use soldeps_util::fs;
use std::path::Path;

/// File name of the node-style package manifest.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// The manifest fields the resolver cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PackageManifest {
    /// Read and parse a manifest file.
    pub async fn read(path: &Path) -> Result<Self, ResolverError> {
        fs::read_json(path).await.map_err(|e| match e {
            fs::ReadJsonError::Io(source) => ResolverError::io(path, source),
            fs::ReadJsonError::Parse(source) => ResolverError::ManifestParse {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}
