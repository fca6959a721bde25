// devassist - tests/e2e_assistant.rs
//
// End-to-end tests for the Assistant: real filesystem, real walkdir and
// glob traversal, real `sh -c` process spawning, real journal files. No
// mocks. Each test builds the helper layout in a temp dir:
//
//   <tmp>/project/            project root
//   <tmp>/project/helper/     anchor
//   <tmp>/project/helper/logs journal + snapshots

use chrono::Local;
use devassist::app::session;
use devassist::core::model::{DirectoryInfo, ProjectStructure};
use devassist::platform::config::Workspace;
use devassist::{Assistant, Level, LogEntry, SessionLogger, SessionSnapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

struct Fixture {
    _dir: TempDir,
    workspace: Workspace,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let anchor = dir.path().join("project").join("helper");
        fs::create_dir_all(&anchor).expect("mkdir helper");
        Self {
            workspace: Workspace::from_anchor(anchor),
            _dir: dir,
        }
    }

    fn root(&self) -> &Path {
        &self.workspace.project_root
    }

    fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir parent");
        }
        fs::write(path, content).expect("write fixture file");
    }

    fn assistant(&self) -> Assistant {
        let logger = SessionLogger::new(&self.workspace.anchor, "logs").expect("logger");
        Assistant::new(logger, self.root()).expect("assistant")
    }
}

fn journal(assistant: &Assistant, category: &str) -> Vec<LogEntry> {
    let path = assistant
        .logger()
        .journal_path(category, Local::now().date_naive());
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|l| serde_json::from_str(l).expect("journal line is standalone JSON"))
        .collect()
}

fn messages(entries: &[LogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.message.as_str()).collect()
}

// =============================================================================
// Structure and config discovery
// =============================================================================

#[test]
fn e2e_structure_has_one_entry_per_visible_directory() {
    let fx = Fixture::new();
    fx.write("src/main.rs", "fn main() {}");
    fx.write("src/bin/tool.rs", "");
    fx.write(".git/HEAD", "ref: refs/heads/main");
    fx.write("docs/.drafts/x.md", "");

    let structure = fx.assistant().analyze_project_structure().unwrap();
    let keys: Vec<&str> = structure.keys().map(String::as_str).collect();

    assert_eq!(
        keys,
        vec![
            "docs",
            "docs/.drafts",
            "helper",
            "helper/logs",
            "src",
            "src/bin"
        ]
    );
    assert_eq!(structure["src"].dirs, vec!["bin".to_string()]);
    assert_eq!(structure["src"].file_count, 1);
}

#[test]
fn e2e_config_files_keep_duplicates() {
    let fx = Fixture::new();
    fx.write("a.json", "{}");
    fx.write("sub/b.yaml", "k: v");

    let assistant = fx.assistant();
    let found = assistant.find_config_files().unwrap();

    assert_eq!(found.iter().filter(|p| p.as_str() == "a.json").count(), 2);
    assert_eq!(found.iter().filter(|p| p.as_str() == "sub/b.yaml").count(), 1);

    let tasks = journal(&assistant, "tasks");
    assert_eq!(
        messages(&tasks),
        vec![
            "Task: Config file search - completed",
            "Details: Found 3 config files"
        ]
    );
}

// =============================================================================
// Commands (POSIX shell)
// =============================================================================

#[cfg(unix)]
#[test]
fn e2e_echo_hi() {
    let fx = Fixture::new();
    let assistant = fx.assistant();

    let result = assistant.run_command("echo hi", None).unwrap().unwrap();
    assert_eq!(result.stdout, "hi\n");
    assert_eq!(result.stderr, "");
    assert_eq!(result.returncode, 0);

    let tasks = journal(&assistant, "tasks");
    let completed: Vec<_> = tasks
        .iter()
        .filter(|e| e.message.ends_with(" - completed"))
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].message, "Task: Command execution: echo hi - completed");
    assert!(tasks.iter().all(|e| e.level == Level::Task));
}

#[cfg(unix)]
#[test]
fn e2e_exit_7_is_failed_not_error() {
    let fx = Fixture::new();
    let assistant = fx.assistant();

    let result = assistant.run_command("exit 7", None).unwrap().unwrap();
    assert_eq!(result.returncode, 7);

    let tasks = journal(&assistant, "tasks");
    assert_eq!(
        messages(&tasks),
        vec!["Task: Command execution: exit 7 - failed", "Details: Return code: 7"]
    );
    assert!(journal(&assistant, "errors").is_empty());
}

#[cfg(unix)]
#[test]
fn e2e_unknown_binary_returns_none_and_one_error() {
    let fx = Fixture::new();
    let assistant = fx.assistant();

    let result = assistant.run_command("nonexistent_binary_xyz", None).unwrap();
    assert!(result.is_none());

    let errors = journal(&assistant, "errors");
    let error_lines: Vec<_> = errors
        .iter()
        .filter(|e| e.message.starts_with("Error: "))
        .collect();
    assert_eq!(error_lines.len(), 1);
    assert_eq!(
        error_lines[0].message,
        "Error: Command execution failed: nonexistent_binary_xyz"
    );
    assert!(errors[1].message.starts_with("Context: Command not found"));
    assert!(journal(&assistant, "tasks").is_empty());
}

#[cfg(unix)]
#[test]
fn e2e_status_127_after_output_is_a_result() {
    let fx = Fixture::new();
    let assistant = fx.assistant();

    let result = assistant
        .run_command("echo important; nonexistent_binary_xyz", None)
        .unwrap()
        .expect("command ran");
    assert_eq!(result.stdout, "important\n");
    assert_eq!(result.returncode, 127);

    let result = assistant.run_command("exit 127", None).unwrap();
    assert_eq!(result.map(|r| r.returncode), Some(127));

    assert!(journal(&assistant, "errors").is_empty());
    let tasks = journal(&assistant, "tasks");
    assert_eq!(
        tasks.iter().filter(|e| e.message.ends_with(" - failed")).count(),
        2
    );
}

#[cfg(unix)]
#[test]
fn e2e_non_executable_script_returns_none() {
    let fx = Fixture::new();
    fx.write("notexec.sh", "echo hi\n");
    let assistant = fx.assistant();

    assert!(assistant.run_command("./notexec.sh", None).unwrap().is_none());

    let errors = journal(&assistant, "errors");
    assert_eq!(errors[0].message, "Error: Command execution failed: ./notexec.sh");
    assert!(errors[1].message.starts_with("Context: Command is not executable"));
}

#[cfg(unix)]
#[test]
fn e2e_command_runs_in_project_root_by_default() {
    let fx = Fixture::new();
    fx.write("marker.txt", "");
    let assistant = fx.assistant();

    let result = assistant.run_command("ls", None).unwrap().unwrap();
    assert!(result.stdout.lines().any(|l| l == "marker.txt"));

    let sub = fx.root().join("helper");
    let result = assistant.run_command("ls", Some(sub.as_path())).unwrap().unwrap();
    assert!(result.stdout.lines().any(|l| l == "logs"));
}

// =============================================================================
// Snapshot
// =============================================================================

#[test]
fn e2e_snapshot_round_trip_preserves_non_ascii() {
    let fx = Fixture::new();
    let assistant = fx.assistant();

    let mut structure = ProjectStructure::new();
    structure.insert(
        "résumé".to_string(),
        DirectoryInfo::new(vec!["子目录".into()], vec!["naïve.toml".into()]),
    );
    let info = SessionSnapshot {
        timestamp: assistant.logger().session_id().to_string(),
        project_structure: structure,
        config_files: vec!["résumé/naïve.toml".into(), "résumé/naïve.toml".into()],
    };

    let path = assistant.save_session_info(&info).unwrap();
    let expected_name = format!("session_{}.json", assistant.logger().session_id());
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected_name);

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("résumé") && raw.contains("子目录"));

    let back: SessionSnapshot = session::load(&path).unwrap();
    assert_eq!(back, info);

    let files = journal(&assistant, "files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].level, Level::File);
}

#[test]
fn e2e_full_session_run() {
    let fx = Fixture::new();
    fx.write("Cargo.toml", "[package]");
    fx.write("config/app.ini", "[x]");

    let assistant = fx.assistant();
    let (snapshot, path) = assistant.run_session().unwrap();

    assert!(path.starts_with(fx.workspace.anchor.join("logs")));
    assert!(snapshot.project_structure.contains_key("config"));
    assert_eq!(
        snapshot.config_files,
        vec!["Cargo.toml", "Cargo.toml", "config/app.ini"]
    );

    let value: serde_json::Value = session::load(&path).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 3);
    for key in ["timestamp", "project_structure", "config_files"] {
        assert!(keys.contains(&key), "missing {key} in {keys:?}");
    }

    // general: init; tasks: 2 x (task + details); files: 1 save
    assert_eq!(journal(&assistant, "general").len(), 1);
    assert_eq!(journal(&assistant, "tasks").len(), 4);
    assert_eq!(journal(&assistant, "files").len(), 1);
}

#[test]
fn e2e_two_loggers_share_daily_files() {
    let fx = Fixture::new();
    let a = SessionLogger::with_session_id(&fx.workspace.anchor, "logs", "20240101_000001").unwrap();
    let b = SessionLogger::with_session_id(&fx.workspace.anchor, "logs", "20240101_000002").unwrap();
    a.log("from a").unwrap();
    b.log("from b").unwrap();

    let path: PathBuf = a.journal_path("general", Local::now().date_naive());
    let lines: Vec<LogEntry> = fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].session_id, "20240101_000001");
    assert_eq!(lines[1].session_id, "20240101_000002");
}
