//! Discovery run configuration.
//!
//! # Design Decisions
//! - The permanent folder exclusions are a constant merged into every run,
//!   never mutable global state: two runs with different configs cannot
//!   observe each other.
//! - Caller exclusions are additive only; nothing can un-exclude `target`
//!   or `.git`.
//! - The exclude filter is one space-separated string so callers can pass it
//!   straight through from an environment variable or CLI flag.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Folder names never descended into, regardless of caller configuration.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 2] = ["target", ".git"];

/// File extensions the scanner recognizes as candidate route modules.
pub const MODULE_EXTENSIONS: [&str; 2] = ["toml", "json"];

/// Configuration for one discovery run. Immutable while the run executes.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Root of the scan. `None` resolves to the process current directory.
    pub project_path: Option<PathBuf>,

    /// Folder names skipped in addition to [`DEFAULT_EXCLUDED_DIRS`].
    pub excluded_dirs: BTreeSet<String>,

    /// File names skipped even when their extension matches.
    pub excluded_files: BTreeSet<String>,

    /// Attach the `GET /_routes` diagnostic endpoint after mounting.
    pub enable_route_table: bool,
}

impl DiscoveryConfig {
    /// Create a config with defaults: current directory, no extra exclusions,
    /// route table off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root directory to scan.
    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    /// Add exclusions from a space-separated filter string.
    ///
    /// A token ending in a recognized module extension excludes a file of
    /// that name; every other token excludes a folder of that name.
    pub fn with_exclude_filter(mut self, filter: &str) -> Self {
        for token in filter.split_whitespace() {
            if has_module_extension(token) {
                self.excluded_files.insert(token.to_string());
            } else {
                self.excluded_dirs.insert(token.to_string());
            }
        }
        self
    }

    /// Enable or disable the diagnostic route table endpoint.
    pub fn with_route_table(mut self, enabled: bool) -> Self {
        self.enable_route_table = enabled;
        self
    }

    /// Folder exclusions with the permanent defaults merged in.
    pub(crate) fn merged_excluded_dirs(&self) -> BTreeSet<String> {
        let mut merged = self.excluded_dirs.clone();
        for name in DEFAULT_EXCLUDED_DIRS {
            merged.insert(name.to_string());
        }
        merged
    }
}

/// True when `name` ends in one of the recognized module extensions.
pub(crate) fn has_module_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MODULE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_splits_files_and_folders() {
        let config = DiscoveryConfig::new().with_exclude_filter("build secrets.json fixtures mock.toml");

        assert!(config.excluded_dirs.contains("build"));
        assert!(config.excluded_dirs.contains("fixtures"));
        assert!(config.excluded_files.contains("secrets.json"));
        assert!(config.excluded_files.contains("mock.toml"));
        assert!(!config.excluded_dirs.contains("secrets.json"));
    }

    #[test]
    fn test_filter_ignores_extra_whitespace() {
        let config = DiscoveryConfig::new().with_exclude_filter("  build   secrets.json ");

        assert_eq!(config.excluded_dirs.len(), 1);
        assert_eq!(config.excluded_files.len(), 1);
    }

    #[test]
    fn test_unknown_extension_is_a_folder_token() {
        // Only module extensions mark a token as a file name.
        let config = DiscoveryConfig::new().with_exclude_filter("notes.txt");

        assert!(config.excluded_dirs.contains("notes.txt"));
        assert!(config.excluded_files.is_empty());
    }

    #[test]
    fn test_permanent_defaults_always_merged() {
        let empty = DiscoveryConfig::new();
        let merged = empty.merged_excluded_dirs();
        assert!(merged.contains("target"));
        assert!(merged.contains(".git"));

        // Caller exclusions add to the defaults, never replace them.
        let extra = DiscoveryConfig::new().with_exclude_filter("build");
        let merged = extra.merged_excluded_dirs();
        assert!(merged.contains("target"));
        assert!(merged.contains(".git"));
        assert!(merged.contains("build"));
    }

    #[test]
    fn test_has_module_extension() {
        assert!(has_module_extension("routes.toml"));
        assert!(has_module_extension("api.json"));
        assert!(!has_module_extension("readme.md"));
        assert!(!has_module_extension("Makefile"));
        assert!(!has_module_extension(".git"));
    }
}
