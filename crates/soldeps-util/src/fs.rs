//! Filesystem access for the resolver.
//!
//! This is the single point where the OS filesystem is touched. Everything
//! above it works on forward-slash source names; only the absolute paths
//! built by callers reach these functions.

use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure reading or decoding a JSON file.
#[derive(Debug, Error)]
pub enum ReadJsonError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Check whether a path exists (file or directory).
pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Read a file as UTF-8, replacing invalid sequences with the replacement
/// character.
pub async fn read_utf8(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a file and parse it as JSON.
///
/// Works for any deserializable target, `serde_json::Value` included.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReadJsonError> {
    let content = read_utf8(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Canonicalize a path, resolving symlinks and `..` segments.
pub async fn real_path(path: &Path) -> io::Result<PathBuf> {
    tokio::fs::canonicalize(path).await
}

/// Look up the on-disk casing of `relative` under `base`.
///
/// `relative` is a forward-slash path. Each segment is matched against the
/// directory listing: an exact byte match wins, otherwise the first entry
/// that matches case-insensitively. Returns `Ok(None)` when no entry
/// matches some segment, or when an intermediate segment is not a
/// directory.
pub async fn true_case(base: &Path, relative: &str) -> io::Result<Option<String>> {
    let mut dir = base.to_path_buf();
    let mut segments: Vec<String> = Vec::new();

    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        }

        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut found: Option<String> = None;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == segment {
                found = Some(name);
                break;
            }
            if found.is_none() && name.to_lowercase() == segment.to_lowercase() {
                found = Some(name);
            }
        }

        match found {
            Some(name) => {
                dir.push(&name);
                segments.push(name);
            }
            None => return Ok(None),
        }
    }

    Ok(Some(segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_exists() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.sol");
        fs::write(&file, "contract A {}").unwrap();

        assert!(exists(&file).await);
        assert!(exists(dir.path()).await);
        assert!(!exists(&dir.path().join("missing.sol")).await);
    }

    #[tokio::test]
    async fn test_read_utf8_valid() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.sol");
        fs::write(&file, "pragma solidity ^0.8.0;").unwrap();

        let content = read_utf8(&file).await.unwrap();
        assert_eq!(content, "pragma solidity ^0.8.0;");
    }

    #[tokio::test]
    async fn test_read_utf8_invalid_sequences_replaced() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.sol");
        fs::write(&file, [0x48, 0x69, 0x80]).unwrap();

        let content = read_utf8(&file).await.unwrap();
        assert!(content.starts_with("Hi"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_read_json_into_value() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("package.json");
        fs::write(&file, r#"{"name": "dep", "version": "1.2.3"}"#).unwrap();

        let value: serde_json::Value = read_json(&file).await.unwrap();
        assert_eq!(value["name"], "dep");
        assert_eq!(value["version"], "1.2.3");
    }

    #[tokio::test]
    async fn test_read_json_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_json::<serde_json::Value>(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadJsonError::Io(_)));
    }

    #[tokio::test]
    async fn test_read_json_invalid_json() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("package.json");
        fs::write(&file, "not json").unwrap();

        let err = read_json::<serde_json::Value>(&file).await.unwrap_err();
        assert!(matches!(err, ReadJsonError::Parse(_)));
    }

    #[tokio::test]
    async fn test_true_case_exact_match() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("contracts")).unwrap();
        fs::write(dir.path().join("contracts/Token.sol"), "").unwrap();

        let result = true_case(dir.path(), "contracts/Token.sol").await.unwrap();
        assert_eq!(result.as_deref(), Some("contracts/Token.sol"));
    }

    #[tokio::test]
    async fn test_true_case_reports_disk_casing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("contracts")).unwrap();
        fs::write(dir.path().join("contracts/Token.sol"), "").unwrap();

        let result = true_case(dir.path(), "contracts/token.sol").await.unwrap();
        assert_eq!(result.as_deref(), Some("contracts/Token.sol"));
    }

    #[tokio::test]
    async fn test_true_case_missing_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("contracts")).unwrap();

        let result = true_case(dir.path(), "contracts/Nope.sol").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_true_case_missing_directory() {
        let dir = tempdir().unwrap();

        let result = true_case(dir.path(), "contracts/Token.sol").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_true_case_segment_is_a_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("contracts"), "not a dir").unwrap();

        let result = true_case(dir.path(), "contracts/Token.sol").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_true_case_exact_match_preferred_over_case_variant() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Token.sol"), "").unwrap();

        let result = true_case(dir.path(), "Token.sol").await.unwrap();
        assert_eq!(result.as_deref(), Some("Token.sol"));
    }
}
