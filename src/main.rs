// devassist - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation (debug mode support)
// 3. Anchor / project root resolution
// 4. Dispatch: default session run, `run`, or `log`

use clap::{Parser, Subcommand};
use devassist::app::assistant::Assistant;
use devassist::app::logger::SessionLogger;
use devassist::core::model::{CommandResult, Level};
use devassist::platform::config::{self, PlatformPaths, Workspace};
use devassist::platform::shell::CommandMode;
use devassist::util;
use std::io::Write;
use std::path::PathBuf;

/// devassist - project structure scans, config discovery, and command runs
/// recorded in a structured JSONL journal.
///
/// With no subcommand: analyses the project structure, finds config files,
/// and saves a session snapshot next to the journal.
#[derive(Parser, Debug)]
#[command(name = "devassist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Helper directory the journal directory lives under.
    #[arg(short = 'a', long = "anchor", global = true)]
    anchor: Option<PathBuf>,

    /// Project root to scan (defaults to the anchor's parent).
    #[arg(short = 'r', long = "root", global = true)]
    root: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command in the project root and journal its outcome.
    Run {
        /// Command line, passed to the shell unless --direct is given.
        command: String,

        /// Working directory (defaults to the project root).
        #[arg(long = "cwd")]
        cwd: Option<PathBuf>,

        /// Exec the program directly instead of through the shell.
        #[arg(long = "direct")]
        direct: bool,
    },

    /// Append one entry to the journal.
    Log {
        message: String,

        /// INFO, TASK, ERROR or FILE.
        #[arg(short = 'l', long = "level", default_value = "INFO")]
        level: Level,

        /// Journal category (selects the file).
        #[arg(long = "category", default_value = util::constants::CATEGORY_GENERAL)]
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "devassist starting"
    );

    match run(cli, app_config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "devassist failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Execute the selected action; returns the process exit code.
fn run(cli: Cli, app_config: config::AppConfig) -> util::error::Result<i32> {
    let workspace = Workspace::resolve(cli.anchor.as_deref(), cli.root.as_deref(), &app_config)?;
    let logger = SessionLogger::new(&workspace.anchor, &app_config.log_dir_name)?;

    match cli.command {
        None => {
            let assistant = Assistant::new(logger, workspace.project_root)?
                .with_config_patterns(app_config.config_patterns);
            let (snapshot, path) = assistant.run_session()?;
            println!("Session {}", snapshot.timestamp);
            println!("  Directories:  {}", snapshot.project_structure.len());
            println!("  Config files: {}", snapshot.config_files.len());
            println!("  Snapshot:     {}", path.display());
            Ok(0)
        }
        Some(Commands::Run {
            command,
            cwd,
            direct,
        }) => {
            let mode = if direct {
                CommandMode::Direct
            } else {
                app_config.command_mode
            };
            let assistant =
                Assistant::new(logger, workspace.project_root)?.with_runner(mode.runner());

            match assistant.run_command(&command, cwd.as_deref())? {
                Some(result) => {
                    echo_output(&result, &mut std::io::stdout(), &mut std::io::stderr());
                    Ok(result.returncode)
                }
                None => {
                    eprintln!("Error: could not launch '{command}' (see the errors journal)");
                    Ok(util::constants::LAUNCH_FAILURE_EXIT_CODE)
                }
            }
        }
        Some(Commands::Log {
            message,
            level,
            category,
        }) => {
            logger.log_at(&message, level, &category)?;
            Ok(0)
        }
    }
}

/// Replay a command's captured output. The journal is already written, so a
/// failed echo (e.g. a closed pipe) only warns; each stream is tried.
fn echo_output(result: &CommandResult, out: &mut dyn Write, err: &mut dyn Write) {
    if let Err(e) = out.write_all(result.stdout.as_bytes()).and_then(|()| out.flush()) {
        tracing::warn!(error = %e, "Could not echo command stdout");
    }
    if let Err(e) = err.write_all(result.stderr.as_bytes()).and_then(|()| err.flush()) {
        tracing::warn!(error = %e, "Could not echo command stderr");
    }
}
