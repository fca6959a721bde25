// devassist - core/config_files.rs
//
// Config file discovery by glob pattern.
//
// Each pattern is matched twice: once non-recursively at the root
// (`<root>/<pattern>`) and once recursively (`<root>/**/<pattern>`).
// `**` also matches zero directories, so a file at the root is reported by
// both passes. Results are concatenated in pass order and never
// deduplicated; callers that want a set must dedupe themselves.
//
// Unreadable entries inside a glob pass are non-fatal: they are logged and
// skipped. An invalid pattern is fatal.

use crate::core::structure::{preflight, relative_key};
use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::Path;

/// The built-in config pattern list as owned strings.
pub fn default_patterns() -> Vec<String> {
    constants::DEFAULT_CONFIG_PATTERNS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Find files under `root` matching any of `patterns`.
///
/// Returns `/`-separated paths relative to `root`, in match order.
pub fn find_config_files(root: &Path, patterns: &[String]) -> Result<Vec<String>, DiscoveryError> {
    preflight(root)?;

    tracing::debug!(root = %root.display(), patterns = ?patterns, "Config search starting");

    // The root may itself contain glob metacharacters ("[", "*").
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let mut found: Vec<String> = Vec::new();

    for pattern in patterns {
        glob::Pattern::new(pattern).map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;

        for full in [
            format!("{escaped_root}/{pattern}"),
            format!("{escaped_root}/**/{pattern}"),
        ] {
            let paths = glob::glob(&full).map_err(|source| DiscoveryError::InvalidPattern {
                pattern: full.clone(),
                source,
            })?;

            for item in paths {
                match item {
                    Ok(path) => found.push(relative_key(root, &path)),
                    Err(e) => {
                        tracing::warn!(
                            path = %e.path().display(),
                            error = %e.error(),
                            "Skipping unreadable entry during config search"
                        );
                    }
                }
            }
        }
    }

    tracing::debug!(count = found.len(), "Config search complete");
    Ok(found)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn count(found: &[String], path: &str) -> usize {
        found.iter().filter(|p| p.as_str() == path).count()
    }

    #[test]
    fn test_root_file_reported_by_both_passes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.json"), "{}").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("b.yaml"), "k: v").unwrap();

        let found = find_config_files(root, &default_patterns()).unwrap();

        assert_eq!(count(&found, "a.json"), 2, "got {found:?}");
        assert_eq!(count(&found, "sub/b.yaml"), 1, "got {found:?}");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_results_follow_pattern_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("setup.cfg"), "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();

        let found = find_config_files(root, &default_patterns()).unwrap();
        assert_eq!(
            found,
            vec![
                "package.json",
                "package.json",
                "Cargo.toml",
                "Cargo.toml",
                "setup.cfg",
                "setup.cfg"
            ]
        );
    }

    #[test]
    fn test_non_matching_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("main.rs"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let found = find_config_files(root, &default_patterns()).unwrap();
        assert!(found.is_empty(), "got {found:?}");
    }

    #[test]
    fn test_nested_matches_use_forward_slashes() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("c.ini"), "").unwrap();

        let found = find_config_files(dir.path(), &["*.ini".to_string()]).unwrap();
        assert_eq!(found, vec!["a/b/c.ini".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_config_files(dir.path(), &["[".to_string()]);
        assert!(matches!(
            result,
            Err(DiscoveryError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_root_metacharacters_are_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj[1]");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("x.toml"), "").unwrap();

        let found = find_config_files(&root, &["*.toml".to_string()]).unwrap();
        assert_eq!(count(&found, "x.toml"), 2, "got {found:?}");
    }
}
