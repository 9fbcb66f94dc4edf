//! Forward-slash source-name arithmetic.
//!
//! Source names are OS-independent `/`-separated strings. Only the absolute
//! paths derived from them ever touch the OS.

use std::path::{Component, Path, PathBuf};

/// Directory part of a source name (`""` for a bare file name).
#[must_use]
pub fn dirname(source_name: &str) -> &str {
    match source_name.rfind('/') {
        Some(idx) => &source_name[..idx],
        None => "",
    }
}

/// Join `relative` onto `base_dir`, normalizing `./` and `../`.
///
/// `../` segments that escape `base_dir` are preserved at the front of the
/// result so callers can detect the escape.
#[must_use]
pub fn join(base_dir: &str, relative: &str) -> String {
    let mut stack: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.is_empty() || stack.last() == Some(&"..") {
                    stack.push("..");
                } else {
                    stack.pop();
                }
            }
            other => stack.push(other),
        }
    }

    stack.join("/")
}

/// Relative forward-slash path of `path` under `root`, if `path` is a plain
/// descendant of `root`.
#[must_use]
pub fn relative_source_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in rel.components() {
        match component {
            Component::Normal(segment) => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str(&segment.to_string_lossy());
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Find the project root by walking up from `start` looking for a package
/// manifest.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(crate::manifest::MANIFEST_FILE_NAME).exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Shorten `path` for display by making it relative to `working_dir` when
/// possible.
#[must_use]
pub fn display_path(working_dir: &Path, path: &Path) -> String {
    match path.strip_prefix(working_dir) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("contracts/Token.sol"), "contracts");
        assert_eq!(dirname("a/b/c.sol"), "a/b");
        assert_eq!(dirname("Token.sol"), "");
    }

    #[test]
    fn test_join_plain() {
        assert_eq!(join("contracts", "Token.sol"), "contracts/Token.sol");
        assert_eq!(join("", "Token.sol"), "Token.sol");
    }

    #[test]
    fn test_join_normalizes_dot_segments() {
        assert_eq!(join("contracts", "./Token.sol"), "contracts/Token.sol");
        assert_eq!(join("contracts", "../Token.sol"), "Token.sol");
        assert_eq!(join("a/b", ".././c.sol"), "a/c.sol");
    }

    #[test]
    fn test_join_preserves_escaping_parents() {
        assert_eq!(join("contracts", "../../Out.sol"), "../Out.sol");
        assert_eq!(join("", "../Out.sol"), "../Out.sol");
        assert_eq!(join("a", "../../../x"), "../../x");
    }

    #[test]
    fn test_relative_source_name() {
        let root = Path::new("/proj");
        assert_eq!(
            relative_source_name(root, Path::new("/proj/contracts/A.sol")).as_deref(),
            Some("contracts/A.sol")
        );
        assert_eq!(relative_source_name(root, Path::new("/other/A.sol")), None);
        assert_eq!(relative_source_name(root, Path::new("/proj")), None);
    }

    #[test]
    fn test_find_project_root() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("contracts").join("utils");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        assert_eq!(find_project_root(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_display_path_inside_working_dir() {
        let wd = Path::new("/home/dev/proj");
        assert_eq!(
            display_path(wd, Path::new("/home/dev/proj/contracts/A.sol")),
            "contracts/A.sol"
        );
        assert_eq!(display_path(wd, Path::new("/etc/hosts")), "/etc/hosts");
    }
}
