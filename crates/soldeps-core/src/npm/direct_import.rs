//! Splitting a direct import into `(package, path-within-package)`.
//!
//! A direct import addresses a package when it has the shape
//! `[@scope/]name/path`, where `name` starts with a lowercase letter, digit,
//! `-` or `~` and continues with those plus `.` and `_`, and `scope` is one
//! or more of the continuation characters.

/// A direct import split into its package and in-package path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpmImport<'a> {
    /// Package name, including a leading `@scope/` when present.
    pub package: &'a str,
    /// Path inside the package (may be empty).
    pub path: &'a str,
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '~')
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || matches!(c, '.' | '_')
}

fn is_valid_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start(c) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check a package name, scoped or not.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    if let Some(rest) = name.strip_prefix('@') {
        let Some((scope, bare)) = rest.split_once('/') else {
            return false;
        };
        !scope.is_empty() && scope.chars().all(is_name_char) && is_valid_bare_name(bare)
    } else {
        is_valid_bare_name(name)
    }
}

/// Split `direct` into package name and in-package path.
///
/// Returns `None` when the import does not have the npm shape.
#[must_use]
pub fn parse_npm_import(direct: &str) -> Option<NpmImport<'_>> {
    let package_end = if direct.starts_with('@') {
        let first_slash = direct.find('/')?;
        let second_slash = direct[first_slash + 1..].find('/')?;
        first_slash + 1 + second_slash
    } else {
        direct.find('/')?
    };

    let package = &direct[..package_end];
    if !is_valid_package_name(package) {
        return None;
    }

    Some(NpmImport {
        package,
        path: &direct[package_end + 1..],
    })
}
