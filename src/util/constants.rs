// devassist - util/constants.rs
//
// Single source of truth for all named constants, formats, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "devassist";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "devassist";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Journal layout
// =============================================================================

/// Default name of the journal directory, resolved under the anchor directory.
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// `chrono` format for session ids (local time, second granularity).
///
/// Two loggers created within the same second share an id.
pub const SESSION_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `chrono` format for the per-entry ISO-8601 timestamp (local, no offset).
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// `chrono` format for the calendar date that partitions journal files.
pub const JOURNAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of the daily per-category journal files.
pub const JOURNAL_EXTENSION: &str = "jsonl";

/// Filename prefix of session snapshot files (`session_<id>.json`).
pub const SNAPSHOT_FILE_PREFIX: &str = "session_";

// =============================================================================
// Journal categories
// =============================================================================

/// Category for plain informational entries.
pub const CATEGORY_GENERAL: &str = "general";

/// Category for task start/completion entries.
pub const CATEGORY_TASKS: &str = "tasks";

/// Category for error entries.
pub const CATEGORY_ERRORS: &str = "errors";

/// Category for file operation entries.
pub const CATEGORY_FILES: &str = "files";

/// Result string recorded for a file operation that succeeded.
pub const FILE_OP_SUCCESS: &str = "success";

// =============================================================================
// Discovery
// =============================================================================

/// Glob patterns (filename-only) that identify configuration files.
pub const DEFAULT_CONFIG_PATTERNS: &[&str] =
    &["*.json", "*.yaml", "*.yml", "*.toml", "*.ini", "*.cfg"];

/// Key used for the project root in a structure scan.
/// It begins with a dot, so the root itself is never recorded.
pub const ROOT_KEY: &str = ".";

// =============================================================================
// Command execution
// =============================================================================

/// Exit status a POSIX shell reports when the command word cannot be found.
pub const SHELL_NOT_FOUND_STATUS: i32 = 127;

/// Exit status a POSIX shell reports when the command word is not executable.
pub const SHELL_NOT_EXECUTABLE_STATUS: i32 = 126;

/// Exit status `cmd.exe` reports when the command word cannot be found.
pub const CMD_NOT_FOUND_STATUS: i32 = 9009;

/// Exit code used by the CLI `run` subcommand when the command never launched.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 127;

// =============================================================================
// Logging
// =============================================================================

/// Default diagnostic log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
