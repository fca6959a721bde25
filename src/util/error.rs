// devassist - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation in library APIs; every variant keeps
// the path or command it concerns plus the underlying cause.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all devassist operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum DevAssistError {
    /// Journal directory creation or a journal write failed.
    Journal(JournalError),

    /// Structure scan or config file discovery failed.
    Discovery(DiscoveryError),

    /// A command could not be launched.
    Command(CommandError),

    /// Writing or reading a session snapshot failed.
    Snapshot(SnapshotError),

    /// Configuration loading or path resolution failed.
    Config(ConfigError),
}

impl fmt::Display for DevAssistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Journal(e) => write!(f, "Journal error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Command(e) => write!(f, "Command error: {e}"),
            Self::Snapshot(e) => write!(f, "Snapshot error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for DevAssistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Journal(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Command(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Journal errors
// ---------------------------------------------------------------------------

/// Errors raised while writing the JSONL journal.
#[derive(Debug)]
pub enum JournalError {
    /// The journal directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// A journal file could not be opened or appended to.
    Write { path: PathBuf, source: io::Error },

    /// A log entry could not be encoded as JSON.
    Serialize { source: serde_json::Error },
}

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "Cannot create journal directory '{}': {source}",
                path.display()
            ),
            Self::Write { path, source } => {
                write!(f, "Cannot append to journal '{}': {source}", path.display())
            }
            Self::Serialize { source } => write!(f, "Cannot encode log entry: {source}"),
        }
    }
}

impl std::error::Error for JournalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            Self::Serialize { source } => Some(source),
        }
    }
}

impl From<JournalError> for DevAssistError {
    fn from(e: JournalError) -> Self {
        Self::Journal(e)
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to the structure scan and config file discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The project root does not exist.
    RootNotFound { path: PathBuf },

    /// The project root is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the project root.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Walkdir traversal error (an unreadable directory below the root).
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Listing the children of a visited directory failed.
    ReadDir { path: PathBuf, source: io::Error },

    /// A config glob pattern did not compile.
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Project root '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Project root '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
            Self::ReadDir { path, source } => {
                write!(f, "Cannot list directory '{}': {source}", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid glob pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            Self::ReadDir { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for DevAssistError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// A command that could not be launched at all.
///
/// A command that runs and exits non-zero is NOT an error; it is reported
/// through `CommandResult::returncode`.
#[derive(Debug)]
pub enum CommandError {
    /// The command string was empty (direct execution only).
    EmptyCommand,

    /// The executable could not be found.
    NotFound { program: String, detail: String },

    /// The executable exists but cannot be executed.
    NotExecutable { program: String, detail: String },

    /// The process could not be spawned or waited on.
    Spawn { command: String, source: io::Error },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "No command given"),
            Self::NotFound { program, detail } if detail.is_empty() => {
                write!(f, "Command not found: '{program}'")
            }
            Self::NotFound { program, detail } => {
                write!(f, "Command not found: '{program}': {detail}")
            }
            Self::NotExecutable { program, detail } => {
                write!(f, "Command is not executable: '{program}': {detail}")
            }
            Self::Spawn { command, source } => {
                write!(f, "Failed to launch '{command}': {source}")
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CommandError> for DevAssistError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Snapshot errors
// ---------------------------------------------------------------------------

/// Errors related to session snapshot files.
#[derive(Debug)]
pub enum SnapshotError {
    /// I/O error writing or reading the snapshot file.
    Io { path: PathBuf, source: io::Error },

    /// JSON (de)serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Snapshot I/O error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "Snapshot JSON error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<SnapshotError> for DevAssistError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and path resolution.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },

    /// No anchor directory could be determined.
    NoAnchor { source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
            Self::NoAnchor { source } => {
                write!(f, "Cannot determine the anchor directory: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NoAnchor { source } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for DevAssistError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for devassist results.
pub type Result<T> = std::result::Result<T, DevAssistError>;
