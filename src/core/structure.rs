// devassist - core/structure.rs
//
// Recursive project structure scan.
//
// Every directory under the root is visited with `walkdir`; for each one we
// record its immediate subdirectories, immediate files, and file count,
// keyed by the directory's path relative to the root.
//
// Hidden-directory rule: a directory is not recorded when its relative key
// *string* begins with '.'. The check is on the whole key, not per segment:
//   - the root itself (key ".") is never recorded;
//   - ".git" and everything below it (".git/objects", ...) are not recorded;
//   - "src/.cache" IS recorded, since its key begins with 's'.
// The walk still descends into unrecorded directories.
//
// Errors are fatal: an unreadable directory anywhere in the tree aborts
// the scan rather than producing a silently partial structure.

use crate::core::model::{DirectoryInfo, ProjectStructure};
use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Component, Path, PathBuf};

/// Scan the directory tree under `root`.
pub fn scan_structure(root: &Path) -> Result<ProjectStructure, DiscoveryError> {
    preflight(root)?;

    tracing::debug!(root = %root.display(), "Structure scan starting");

    let mut structure = ProjectStructure::new();
    let mut skipped = 0usize;

    let walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry_result in walker {
        let entry = entry_result.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            DiscoveryError::Traversal { path, source: e }
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let key = relative_key(root, entry.path());
        if is_hidden_key(&key) {
            tracing::trace!(dir = %key, "Not recorded: hidden key");
            skipped += 1;
            continue;
        }

        let (dirs, files) = list_children(entry.path())?;
        structure.insert(key, DirectoryInfo::new(dirs, files));
    }

    tracing::debug!(
        directories = structure.len(),
        skipped,
        "Structure scan complete"
    );

    Ok(structure)
}

/// Fail fast with a typed error when `root` is missing or not a directory.
///
/// `fs::metadata()` is used rather than `Path::is_dir()` so that
/// PermissionDenied is distinguishable from NotFound.
pub(crate) fn preflight(root: &Path) -> Result<(), DiscoveryError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(_) => Err(DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        }),
    }
}

/// `/`-joined path of `path` relative to `root`; `"."` for the root itself.
pub(crate) fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        constants::ROOT_KEY.to_string()
    } else {
        parts.join("/")
    }
}

/// True when the key string starts with a dot.
pub(crate) fn is_hidden_key(key: &str) -> bool {
    key.starts_with('.')
}

/// Immediate subdirectory and file names of `dir`, each sorted.
///
/// Symlinks are classified by their target, so a link to a directory is
/// listed under `dirs` even though the walk does not follow it.
fn list_children(dir: &Path) -> Result<(Vec<String>, Vec<String>), DiscoveryError> {
    let read_err = |source: std::io::Error| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for child in std::fs::read_dir(dir).map_err(read_err)? {
        let child = child.map_err(read_err)?;
        let name = child.file_name().to_string_lossy().into_owned();
        let child_path: PathBuf = child.path();
        if child_path.is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }

    dirs.sort();
    files.sort();
    Ok((dirs, files))
}

// =============================================================================
// Tests
// =============================================================================
