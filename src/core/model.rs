// devassist - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers and define the
// on-disk JSON shapes of journal lines and session snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Journal entry
// =============================================================================

/// A single journal line.
///
/// Field order is the on-disk key order:
/// `timestamp, session_id, level, category, message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local ISO-8601 timestamp of the write.
    pub timestamp: String,

    /// Id of the session that wrote the entry.
    pub session_id: String,

    pub level: Level,

    /// Free-form bucket; also selects the journal file.
    pub category: String,

    pub message: String,
}

// =============================================================================
// Level
// =============================================================================

/// Journal entry level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[default]
    Info,
    Task,
    Error,
    File,
}

impl Level {
    /// Returns all variants.
    pub fn all() -> &'static [Level] {
        &[Level::Info, Level::Task, Level::Error, Level::File]
    }

    /// The on-disk label.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Task => "TASK",
            Level::Error => "ERROR",
            Level::File => "FILE",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    /// Case-insensitive parse of a level label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::all()
            .iter()
            .copied()
            .find(|l| l.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown level '{s}' (expected INFO, TASK, ERROR or FILE)"))
    }
}

// =============================================================================
// Task status
// =============================================================================

/// Status word recorded in a `Task: <name> - <status>` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Started,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Started => "started",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    /// `Completed` for a zero exit code, `Failed` otherwise.
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            TaskStatus::Completed
        } else {
            TaskStatus::Failed
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Project structure
// =============================================================================

/// Immediate contents of one visited directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryInfo {
    /// Names of immediate subdirectories (sorted).
    pub dirs: Vec<String>,

    /// Names of immediate files (sorted).
    pub files: Vec<String>,

    /// Always `files.len()`.
    pub file_count: usize,
}

impl DirectoryInfo {
    pub fn new(dirs: Vec<String>, files: Vec<String>) -> Self {
        let file_count = files.len();
        Self {
            dirs,
            files,
            file_count,
        }
    }
}

/// Relative directory path (`/`-separated) to its contents.
pub type ProjectStructure = BTreeMap<String, DirectoryInfo>;

// =============================================================================
// Command result
// =============================================================================

/// Captured outcome of a command that launched and exited.
///
/// A non-zero `returncode` is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.returncode == 0
    }
}

// =============================================================================
// Session snapshot
// =============================================================================

/// The document written once per run as `session_<id>.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The session id (not a wall-clock timestamp despite the key name).
    pub timestamp: String,

    pub project_structure: ProjectStructure,

    /// Relative config file paths; may contain duplicates.
    pub config_files: Vec<String>,
}
