// devassist - app/assistant.rs
//
// Orchestration: each Assistant operation calls into core/platform and
// journals its outcome through the owned SessionLogger.
//
// Only command launch faults are recovered (journaled and turned into
// `None`). Scan errors, journal write errors, and snapshot errors all
// propagate to the caller.

use crate::app::logger::SessionLogger;
use crate::app::session;
use crate::core::config_files::{default_patterns, find_config_files};
use crate::core::model::{CommandResult, ProjectStructure, SessionSnapshot, TaskStatus};
use crate::core::structure::scan_structure;
use crate::platform::shell::{CommandRunner, ShellRunner};
use crate::util::constants;
use crate::util::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Project introspection bound to one project root and one journal session.
pub struct Assistant {
    logger: SessionLogger,
    project_root: PathBuf,
    config_patterns: Vec<String>,
    runner: Box<dyn CommandRunner>,
}

impl Assistant {
    /// Take ownership of `logger` and journal the start of the session.
    pub fn new(logger: SessionLogger, project_root: impl Into<PathBuf>) -> Result<Self> {
        let assistant = Self {
            logger,
            project_root: project_root.into(),
            config_patterns: default_patterns(),
            runner: Box::new(ShellRunner),
        };
        assistant.logger.log("Assistant initialized")?;
        tracing::info!(
            session_id = assistant.logger.session_id(),
            project_root = %assistant.project_root.display(),
            "Assistant ready"
        );
        Ok(assistant)
    }

    /// Replace the process spawner (e.g. `DirectRunner` for untrusted input).
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_config_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config_patterns = patterns;
        self
    }

    pub fn logger(&self) -> &SessionLogger {
        &self.logger
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Map every recorded directory under the project root to its contents.
    pub fn analyze_project_structure(&self) -> Result<ProjectStructure> {
        let structure = scan_structure(&self.project_root)?;
        self.logger.log_task(
            "Project structure analysis",
            TaskStatus::Completed,
            Some(format!("Found {} directories", structure.len()).as_str()),
        )?;
        Ok(structure)
    }

    /// Relative paths of config files; root-level matches appear twice.
    pub fn find_config_files(&self) -> Result<Vec<String>> {
        let found = find_config_files(&self.project_root, &self.config_patterns)?;
        self.logger.log_task(
            "Config file search",
            TaskStatus::Completed,
            Some(format!("Found {} config files", found.len()).as_str()),
        )?;
        Ok(found)
    }

    /// Run `command` in `cwd` (default: the project root).
    ///
    /// `Ok(Some(_))` for any command that ran, whatever its exit code.
    /// `Ok(None)` when it could not be launched; the fault is journaled.
    pub fn run_command(&self, command: &str, cwd: Option<&Path>) -> Result<Option<CommandResult>> {
        let cwd = cwd.unwrap_or(self.project_root.as_path());
        let task = format!("Command execution: {command}");

        match self.runner.run(command, cwd) {
            Ok(result) => {
                self.logger.log_task(
                    &task,
                    TaskStatus::from_exit_code(result.returncode),
                    Some(format!("Return code: {}", result.returncode).as_str()),
                )?;
                tracing::debug!(command, returncode = result.returncode, "Command finished");
                Ok(Some(result))
            }
            Err(e) => {
                tracing::warn!(command, error = %e, "Command could not be launched");
                self.logger.log_error(
                    &format!("Command execution failed: {command}"),
                    Some(e.to_string().as_str()),
                )?;
                Ok(None)
            }
        }
    }

    /// Write `info` as this session's snapshot; returns the file path.
    pub fn save_session_info<T: Serialize + ?Sized>(&self, info: &T) -> Result<PathBuf> {
        let path = session::snapshot_path(self.logger.log_dir(), self.logger.session_id());
        session::save(info, &path)?;
        self.logger
            .log_file_operation("save", &path, constants::FILE_OP_SUCCESS)?;
        Ok(path)
    }

    /// Structure analysis and config discovery, bundled as a snapshot.
    pub fn collect_snapshot(&self) -> Result<SessionSnapshot> {
        let project_structure = self.analyze_project_structure()?;
        let config_files = self.find_config_files()?;
        Ok(SessionSnapshot {
            timestamp: self.logger.session_id().to_string(),
            project_structure,
            config_files,
        })
    }

    /// The default run: analyse, discover, save.
    pub fn run_session(&self) -> Result<(SessionSnapshot, PathBuf)> {
        let snapshot = self.collect_snapshot()?;
        let path = self.save_session_info(&snapshot)?;
        tracing::info!(
            directories = snapshot.project_structure.len(),
            config_files = snapshot.config_files.len(),
            snapshot = %path.display(),
            "Session complete"
        );
        Ok((snapshot, path))
    }
}

// =============================================================================
// Tests
// =============================================================================
