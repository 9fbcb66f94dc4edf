//! Parsing and validation of user remappings.
//!
//! Validation happens once, at resolver construction. A remapping whose
//! target starts with `npm/` must name an installed package with the exact
//! declared version (or `local` for a monorepo package); everything else is
//! accepted as a plain project-local rewrite.

use super::UserRemapping;
use crate::error::ResolverError;
use crate::manifest::PackageManifest;
use crate::npm::{classify_manifest, is_valid_package_name, locate_manifest, PackageLocation};
use crate::resolver::{Package, LOCAL_VERSION};
use std::path::Path;
use std::sync::Arc;

/// Prefix marking package-rooted source names.
pub const NPM_PREFIX: &str = "npm/";

/// Split `[context:]prefix=target`. `context` is optional and `target` may
/// be empty.
pub fn parse_remapping_text(raw: &str) -> Result<(String, String, String), ResolverError> {
    let Some((lhs, target)) = raw.split_once('=') else {
        return Err(ResolverError::InvalidUserRemapping {
            raw: raw.to_string(),
            reason: "expected `[context:]prefix=target`".to_string(),
        });
    };

    let (context, prefix) = match lhs.split_once(':') {
        Some((context, prefix)) => (context, prefix),
        None => ("", lhs),
    };

    if prefix.is_empty() {
        return Err(ResolverError::InvalidUserRemapping {
            raw: raw.to_string(),
            reason: "the prefix must not be empty".to_string(),
        });
    }

    Ok((
        context.to_string(),
        prefix.to_string(),
        target.to_string(),
    ))
}

/// Parse an `npm/<name>@<version>/<path>` target.
fn parse_npm_target(target: &str) -> Option<(&str, &str, &str)> {
    let rest = target.strip_prefix(NPM_PREFIX)?;

    let name_end = if rest.starts_with('@') {
        let slash = rest.find('/')?;
        slash + 1 + rest[slash + 1..].find('@')?
    } else {
        rest.find('@')?
    };

    let name = &rest[..name_end];
    let after = &rest[name_end + 1..];
    let slash = after.find('/')?;
    let version = &after[..slash];
    let path = &after[slash + 1..];

    if !is_valid_package_name(name) || !is_valid_version(version) {
        return None;
    }

    Some((name, version, path))
}

fn is_valid_version(version: &str) -> bool {
    if version == LOCAL_VERSION {
        return true;
    }
    let mut parts = version.split('.');
    let triple = (parts.next(), parts.next(), parts.next(), parts.next());
    match triple {
        (Some(a), Some(b), Some(c), None) => [a, b, c]
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|ch| ch.is_ascii_digit())),
        _ => false,
    }
}

/// Validate one remapping string against the project layout.
pub async fn validate_remapping(
    raw: &str,
    project_root: &Path,
) -> Result<UserRemapping, ResolverError> {
    let (context, prefix, target) = parse_remapping_text(raw)?;

    if context.starts_with(NPM_PREFIX) {
        return Err(ResolverError::InvalidUserRemapping {
            raw: raw.to_string(),
            reason: "the context must not reach into `npm/`".to_string(),
        });
    }

    if !target.starts_with(NPM_PREFIX) {
        return Ok(UserRemapping {
            raw: raw.to_string(),
            context,
            prefix,
            target,
            target_package: None,
        });
    }

    let Some((name, version, _path)) = parse_npm_target(&target) else {
        return Err(ResolverError::InvalidNpmTarget {
            raw: raw.to_string(),
        });
    };

    let Some(manifest_path) = locate_manifest(name, project_root).await else {
        return Err(ResolverError::PackageNotInstalled {
            raw: raw.to_string(),
            package: name.to_string(),
        });
    };

    let package = match classify_manifest(&manifest_path, project_root) {
        PackageLocation::Project => {
            return Err(ResolverError::RemapIntoProject {
                raw: raw.to_string(),
            });
        }
        PackageLocation::MonorepoSibling => {
            if version != LOCAL_VERSION {
                return Err(ResolverError::MonorepoVersionMismatch {
                    raw: raw.to_string(),
                    package: name.to_string(),
                });
            }
            root_package(name, LOCAL_VERSION, &manifest_path)
        }
        PackageLocation::Installed => {
            let manifest = PackageManifest::read(&manifest_path).await?;
            let installed = manifest.version.as_deref().unwrap_or("0.0.0");
            if installed != version {
                return Err(ResolverError::PackageVersionMismatch {
                    raw: raw.to_string(),
                    package: name.to_string(),
                    installed: installed.to_string(),
                    declared: version.to_string(),
                });
            }
            root_package(name, version, &manifest_path)
        }
    };

    Ok(UserRemapping {
        raw: raw.to_string(),
        context,
        prefix,
        target,
        target_package: Some(Arc::new(package)),
    })
}

fn root_package(name: &str, version: &str, manifest_path: &Path) -> Package {
    let root = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Package::new(name, version, root)
}
