// devassist - app/session.rs
//
// Session snapshot persistence: one pretty-printed JSON document per run,
// `<log_dir>/session_<session_id>.json`.
//
// - Saved atomically (write temp, rename final) so an interrupted save
//   never leaves a truncated snapshot; an existing file of the same name
//   is replaced.
// - Two-space indentation; non-ASCII text is written as-is, never escaped.
// - Key order follows the serialised type's field order.

use crate::util::constants::SNAPSHOT_FILE_PREFIX;
use crate::util::error::SnapshotError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Resolve the snapshot file path for a session.
pub fn snapshot_path(log_dir: &Path, session_id: &str) -> PathBuf {
    log_dir.join(format!("{SNAPSHOT_FILE_PREFIX}{session_id}.json"))
}

/// Save `data` to `path` atomically (write temp → rename).
pub fn save<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(data).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|source| SnapshotError::Io {
        path: tmp.clone(),
        source,
    })?;

    std::fs::rename(&tmp, path).map_err(|source| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "Snapshot saved");
    Ok(())
}

/// Read a snapshot (or any JSON document written by [`save`]) back.
///
/// Library API only: the `devassist` binary writes snapshots but never reads
/// them. Consumers and the tests use this to inspect a saved session.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{DirectoryInfo, ProjectStructure, SessionSnapshot};
    use tempfile::TempDir;

    fn sample_snapshot() -> SessionSnapshot {
        let mut structure = ProjectStructure::new();
        structure.insert(
            "src".to_string(),
            DirectoryInfo::new(vec!["core".into()], vec!["main.rs".into()]),
        );
        structure.insert(
            "ドキュメント".to_string(),
            DirectoryInfo::new(vec![], vec!["café.md".into()]),
        );
        SessionSnapshot {
            timestamp: "20240101_120000".to_string(),
            project_structure: structure,
            config_files: vec!["Cargo.toml".into(), "Cargo.toml".into()],
        }
    }

    #[test]
    fn test_snapshot_path() {
        let path = snapshot_path(Path::new("/x/logs"), "20240101_120000");
        assert_eq!(path, PathBuf::from("/x/logs/session_20240101_120000.json"));
    }

    #[test]
    fn test_save_load_round_trip_is_deep_equal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let original = sample_snapshot();

        save(&original, &path).expect("save should succeed");
        let loaded: SessionSnapshot = load(&path).expect("load should succeed");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_output_is_two_space_indented_and_unescaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        save(&sample_snapshot(), &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"timestamp\": \"20240101_120000\""), "got {raw}");
        assert!(raw.contains("ドキュメント"));
        assert!(raw.contains("café.md"));
        assert!(!raw.contains("\\u"), "non-ASCII must not be escaped");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"old contents").unwrap();

        // A leftover temp file from an interrupted save must not matter.
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        save(&sample_snapshot(), &path).unwrap();
        let loaded: SessionSnapshot = load(&path).unwrap();
        assert_eq!(loaded.timestamp, "20240101_120000");
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        let result: Result<SessionSnapshot, _> = load(&path);
        assert!(matches!(result, Err(SnapshotError::Json { .. })));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result: Result<SessionSnapshot, _> = load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }
}
