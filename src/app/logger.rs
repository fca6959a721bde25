// devassist - app/logger.rs
//
// The session journal: append-only JSON-lines files partitioned by
// category and local calendar date:
//
//   <anchor>/<log_dir>/<category>_<YYYY-MM-DD>.jsonl
//
// One `SessionLogger` is one session; its id is fixed at construction.
// There is no locking. Each entry is written with a single `write_all` of
// the encoded line plus '\n' on a file opened in append mode, so concurrent
// writers interleave whole lines but may interleave their order.
//
// Write failures are returned, never retried and never swallowed.

use crate::core::model::{Level, LogEntry, TaskStatus};
use crate::util::constants;
use crate::util::error::JournalError;
use chrono::{Local, NaiveDate};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only structured journal for one session.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    log_dir: PathBuf,
    session_id: String,
}

impl SessionLogger {
    /// Create the journal directory under `anchor` (if needed) and start a
    /// session whose id is the current local time, `YYYYMMDD_HHMMSS`.
    pub fn new(anchor: &Path, log_dir_name: &str) -> Result<Self, JournalError> {
        let session_id = Local::now().format(constants::SESSION_ID_FORMAT).to_string();
        Self::with_session_id(anchor, log_dir_name, session_id)
    }

    /// As [`SessionLogger::new`] with a caller-chosen session id.
    pub fn with_session_id(
        anchor: &Path,
        log_dir_name: &str,
        session_id: impl Into<String>,
    ) -> Result<Self, JournalError> {
        let log_dir = anchor.join(log_dir_name);
        std::fs::create_dir_all(&log_dir).map_err(|source| JournalError::CreateDir {
            path: log_dir.clone(),
            source,
        })?;

        let session_id = session_id.into();
        tracing::debug!(
            log_dir = %log_dir.display(),
            session_id = %session_id,
            "Journal session started"
        );

        Ok(Self {
            log_dir,
            session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the journal file for `category` on `date`.
    pub fn journal_path(&self, category: &str, date: NaiveDate) -> PathBuf {
        self.log_dir.join(format!(
            "{category}_{}.{}",
            date.format(constants::JOURNAL_DATE_FORMAT),
            constants::JOURNAL_EXTENSION
        ))
    }

    /// Append an INFO entry to the `general` journal.
    pub fn log(&self, message: &str) -> Result<(), JournalError> {
        self.log_at(message, Level::Info, constants::CATEGORY_GENERAL)
    }

    /// Append one entry to today's journal file for `category`.
    pub fn log_at(&self, message: &str, level: Level, category: &str) -> Result<(), JournalError> {
        let now = Local::now();
        let entry = LogEntry {
            timestamp: now
                .naive_local()
                .format(constants::ENTRY_TIMESTAMP_FORMAT)
                .to_string(),
            session_id: self.session_id.clone(),
            level,
            category: category.to_string(),
            message: message.to_string(),
        };

        let path = self.journal_path(category, now.date_naive());
        append_line(&path, &entry)?;

        tracing::trace!(
            file = %path.display(),
            level = %level,
            entry = message,
            "Journal entry written"
        );
        Ok(())
    }

    /// `Task: <name> - <status>`, plus `Details: <details>` when given.
    pub fn log_task(
        &self,
        name: &str,
        status: TaskStatus,
        details: Option<&str>,
    ) -> Result<(), JournalError> {
        self.log_at(
            &format!("Task: {name} - {status}"),
            Level::Task,
            constants::CATEGORY_TASKS,
        )?;
        if let Some(details) = non_empty(details) {
            self.log_at(
                &format!("Details: {details}"),
                Level::Task,
                constants::CATEGORY_TASKS,
            )?;
        }
        Ok(())
    }

    /// `Error: <message>`, plus `Context: <context>` when given.
    pub fn log_error(&self, message: &str, context: Option<&str>) -> Result<(), JournalError> {
        self.log_at(
            &format!("Error: {message}"),
            Level::Error,
            constants::CATEGORY_ERRORS,
        )?;
        if let Some(context) = non_empty(context) {
            self.log_at(
                &format!("Context: {context}"),
                Level::Error,
                constants::CATEGORY_ERRORS,
            )?;
        }
        Ok(())
    }

    /// `<operation>: <path> - <result>` as a single FILE entry.
    pub fn log_file_operation(
        &self,
        operation: &str,
        path: &Path,
        result: &str,
    ) -> Result<(), JournalError> {
        self.log_at(
            &format!("{operation}: {} - {result}", path.display()),
            Level::File,
            constants::CATEGORY_FILES,
        )
    }
}

/// Empty strings count as absent.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn append_line(path: &Path, entry: &LogEntry) -> Result<(), JournalError> {
    let mut line =
        serde_json::to_string(entry).map_err(|source| JournalError::Serialize { source })?;
    line.push('\n');

    let write_err = |source: std::io::Error| JournalError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(line.as_bytes()).map_err(write_err)
}

// =============================================================================
// Tests
// =============================================================================
