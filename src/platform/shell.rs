// devassist - platform/shell.rs
//
// Process execution behind a small trait so the spawn mechanism is
// pluggable. Two implementations:
//
//   - ShellRunner: hands the command string to the platform shell
//     (`sh -c` / `cmd /C`). Pipes, redirects and builtins work. Never use
//     it with untrusted input: the string is interpreted by the shell.
//   - DirectRunner: splits on whitespace and execs the program directly.
//     No quoting, globbing or variable expansion.
//
// Both block until the child exits; there is no timeout.

use crate::core::model::CommandResult;
use crate::util::constants;
use crate::util::error::CommandError;
use std::path::Path;
use std::process::{Command, Output};

/// Something that can run a command string in a working directory.
pub trait CommandRunner {
    /// Run `command` in `cwd` and capture its output.
    ///
    /// `Err` means the command never ran. A command that ran and exited
    /// non-zero is `Ok` with that exit code.
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandResult, CommandError>;
}

// =============================================================================
// Shell runner
// =============================================================================

/// Runs commands through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    #[cfg(unix)]
    fn command(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }

    #[cfg(windows)]
    fn command(command: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandResult, CommandError> {
        tracing::debug!(command, cwd = %cwd.display(), "Running through shell");

        let output = Self::command(command)
            .current_dir(cwd)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let result = to_result(output);
        match launch_fault(command, &result) {
            Some(fault) => Err(fault),
            None => Ok(result),
        }
    }
}

/// The shell itself always launches, so a missing or non-executable
/// command word only shows up as the shell's own report: a dedicated exit
/// status, no stdout, and a stderr line naming the first word.
fn launch_fault(command: &str, result: &CommandResult) -> Option<CommandError> {
    let program = first_word(command);
    if program.is_empty() || !result.stdout.is_empty() {
        return None;
    }

    let line = result
        .stderr
        .lines()
        .find(|line| names_program(line, program))?
        .trim();
    let program = program.to_string();
    let detail = line.to_string();

    if cfg!(windows) {
        return (result.returncode == constants::CMD_NOT_FOUND_STATUS)
            .then_some(CommandError::NotFound { program, detail });
    }

    match result.returncode {
        constants::SHELL_NOT_FOUND_STATUS
            if line.ends_with("not found") || line.ends_with("No such file or directory") =>
        {
            Some(CommandError::NotFound { program, detail })
        }
        constants::SHELL_NOT_EXECUTABLE_STATUS if line.ends_with("Permission denied") => {
            Some(CommandError::NotExecutable { program, detail })
        }
        _ => None,
    }
}

/// `sh: 1: foo: not found` / `bash: foo: command not found` on Unix,
/// `'foo' is not recognized ...` from `cmd.exe`.
fn names_program(line: &str, program: &str) -> bool {
    if cfg!(windows) {
        line.starts_with(&format!("'{program}'"))
    } else {
        line.contains(&format!("{program}: "))
    }
}

// =============================================================================
// Direct runner
// =============================================================================

/// Runs the first whitespace-separated word as the program, the rest as
/// its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRunner;

impl CommandRunner for DirectRunner {
    fn run(&self, command: &str, cwd: &Path) -> Result<CommandResult, CommandError> {
        let mut words = command.split_whitespace();
        let program = words.next().ok_or(CommandError::EmptyCommand)?;

        tracing::debug!(program, cwd = %cwd.display(), "Running directly");

        let output = Command::new(program)
            .args(words)
            .current_dir(cwd)
            .output()
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound if cwd.is_dir() => CommandError::NotFound {
                    program: program.to_string(),
                    detail: source.to_string(),
                },
                std::io::ErrorKind::PermissionDenied if cwd.is_dir() => {
                    CommandError::NotExecutable {
                        program: program.to_string(),
                        detail: source.to_string(),
                    }
                }
                _ => CommandError::Spawn {
                    command: command.to_string(),
                    source,
                },
            })?;

        Ok(to_result(output))
    }
}

// =============================================================================
// Mode selection
// =============================================================================

/// Which runner to use; selected by config `[command] mode` or `run --direct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandMode {
    #[default]
    Shell,
    Direct,
}

impl CommandMode {
    pub fn runner(self) -> Box<dyn CommandRunner> {
        match self {
            CommandMode::Shell => Box::new(ShellRunner),
            CommandMode::Direct => Box::new(DirectRunner),
        }
    }
}

impl std::str::FromStr for CommandMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shell" => Ok(CommandMode::Shell),
            "direct" => Ok(CommandMode::Direct),
            other => Err(format!("unknown command mode '{other}'")),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn first_word(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}

fn to_result(output: Output) -> CommandResult {
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        returncode: exit_code(&output.status),
    }
}

/// Exit code, or the negated signal number when the child was killed.
#[cfg(unix)]
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => code,
        None => status.signal().map_or(-1, |sig| -sig),
    }
}

#[cfg(not(unix))]
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

// =============================================================================
// Tests
// =============================================================================
