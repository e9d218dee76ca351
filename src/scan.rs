//! Candidate discovery.
//!
//! # Responsibilities
//! - Walk the project tree depth-first with entries sorted by file name
//! - Prune excluded folders without touching their siblings
//! - Emit candidate files whose extension is a recognized module format
//!
//! # Design Decisions
//! - Deterministic order: two scans of an unchanged tree yield the same list,
//!   and mount order (therefore route precedence) follows it downstream
//! - Any unreadable directory is fatal; an incomplete candidate list would
//!   silently change mount order

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{has_module_extension, DiscoveryConfig};
use crate::error::DiscoveryError;

/// A discovered file that may or may not load as a route module.
///
/// The format convention is not knowable from the path alone; every loading
/// strategy gets a chance at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path of the file, rooted at the scanned project path.
    pub path: PathBuf,
}

impl Candidate {
    /// The file extension, when it is valid UTF-8.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }
}

/// Walk `root` and collect candidate files in deterministic order.
///
/// `root` must be a directory; each path appears at most once in the result.
/// Fails with [`DiscoveryError::DirectoryRead`] on the first directory that
/// cannot be listed, including a missing root or a root that is not a
/// directory.
pub fn scan(root: &Path, config: &DiscoveryConfig) -> Result<Vec<Candidate>, DiscoveryError> {
    let metadata = std::fs::metadata(root).map_err(|source| DiscoveryError::DirectoryRead {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(DiscoveryError::DirectoryRead {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let excluded_dirs = config.merged_excluded_dirs();
    let mut candidates = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The root itself is never pruned, even if its own name matches.
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !excluded_dirs.contains(name.as_ref())
        });

    for entry in walker {
        let entry = entry.map_err(|err| directory_read_error(root, err))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !has_module_extension(&name) || config.excluded_files.contains(name.as_ref()) {
            continue;
        }
        candidates.push(Candidate {
            path: entry.into_path(),
        });
    }

    tracing::debug!(
        root = %root.display(),
        candidates = candidates.len(),
        "Scan complete"
    );
    Ok(candidates)
}

fn directory_read_error(root: &Path, err: walkdir::Error) -> DiscoveryError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop"));
    DiscoveryError::DirectoryRead { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn rel_paths(root: &Path, candidates: &[Candidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| {
                c.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_emits_recognized_extensions_only() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "api.toml", "");
        write(dir.path(), "api.json", "");
        write(dir.path(), "readme.md", "");
        write(dir.path(), "Makefile", "");

        let found = scan(dir.path(), &DiscoveryConfig::new()).unwrap();
        assert_eq!(rel_paths(dir.path(), &found), vec!["api.json", "api.toml"]);
    }

    #[test]
    fn test_default_excluded_dirs_pruned_without_filter() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "target/hidden.toml", "");
        write(dir.path(), ".git/config.json", "");
        write(dir.path(), "routes/api.toml", "");

        let found = scan(dir.path(), &DiscoveryConfig::new()).unwrap();
        assert_eq!(rel_paths(dir.path(), &found), vec!["routes/api.toml"]);
    }

    #[test]
    fn test_exclusion_is_additive_and_sibling_preserving() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "build/out.toml", "");
        write(dir.path(), "site/secrets.json", "");
        write(dir.path(), "site/api.json", "");
        write(dir.path(), "other/api.toml", "");

        let config = DiscoveryConfig::new().with_exclude_filter("build secrets.json");
        let found = scan(dir.path(), &config).unwrap();
        assert_eq!(
            rel_paths(dir.path(), &found),
            vec!["other/api.toml", "site/api.json"]
        );
    }

    #[test]
    fn test_excluding_a_folder_keeps_its_siblings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "skip/a.toml", "");
        write(dir.path(), "keep/a.toml", "");
        write(dir.path(), "keep/skip/b.toml", "");

        let config = DiscoveryConfig::new().with_exclude_filter("skip");
        let found = scan(dir.path(), &config).unwrap();
        // Both `skip` folders are pruned (exclusion is by name), but `keep`
        // itself and its direct files survive.
        assert_eq!(rel_paths(dir.path(), &found), vec!["keep/a.toml"]);
    }

    #[test]
    fn test_deterministic_order_across_runs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b/one.toml", "");
        write(dir.path(), "a/two.json", "");
        write(dir.path(), "a/one.toml", "");
        write(dir.path(), "root.json", "");

        let config = DiscoveryConfig::new();
        let first = scan(dir.path(), &config).unwrap();
        let second = scan(dir.path(), &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            rel_paths(dir.path(), &first),
            vec!["a/one.toml", "a/two.json", "b/one.toml", "root.json"]
        );
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nowhere");

        let err = scan(&missing, &DiscoveryConfig::new()).unwrap_err();
        let DiscoveryError::DirectoryRead { path, .. } = err;
        assert_eq!(path, missing);
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "file.toml", "");

        let err = scan(&dir.path().join("file.toml"), &DiscoveryConfig::new());
        assert!(err.is_err());
    }
}
