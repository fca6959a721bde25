// devassist - platform/config.rs
//
// Platform-specific configuration directory resolution, config.toml loading
// with startup validation, and anchor / project-root resolution.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::platform::shell::CommandMode;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for devassist configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/devassist/ or %APPDATA%\devassist\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[paths]` section.
    pub paths: PathsSection,
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[command]` section.
    pub command: CommandSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[paths]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Directory the journal directory lives under.
    pub anchor: Option<PathBuf>,
    /// Directory to scan; defaults to the anchor's parent.
    pub project_root: Option<PathBuf>,
    /// Journal directory name under the anchor.
    pub log_dir: Option<String>,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Filename glob patterns identifying config files.
    pub config_patterns: Option<Vec<String>>,
}

/// `[command]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CommandSection {
    /// "shell" or "direct".
    pub mode: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Diagnostic log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub anchor: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    pub log_dir_name: String,
    pub config_patterns: Vec<String>,
    pub command_mode: CommandMode,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anchor: None,
            project_root: None,
            log_dir_name: constants::DEFAULT_LOG_DIR_NAME.to_string(),
            config_patterns: crate::core::config_files::default_patterns(),
            command_mode: CommandMode::default(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the tool still runs but the user is informed.
///
/// Called before the tracing subscriber exists, so warnings are returned
/// rather than logged.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source,
            };
            warnings.push(format!(
                "{err}. Using defaults. See config.example.toml for the expected format."
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let config = validate(raw, &mut warnings);
    (config, warnings)
}

/// Validate each field, accumulating all problems as warnings.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig {
        anchor: raw.paths.anchor,
        project_root: raw.paths.project_root,
        ..AppConfig::default()
    };

    let mut reject = |field: &str, value: &str, expected: &str| {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        };
        warnings.push(format!("{err}. Using default."));
    };

    // -- Paths: log_dir --
    if let Some(name) = raw.paths.log_dir {
        if !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".." {
            config.log_dir_name = name;
        } else {
            reject(
                "paths.log_dir",
                &name,
                "a single directory name without separators",
            );
        }
    }

    // -- Discovery: config_patterns --
    if let Some(patterns) = raw.discovery.config_patterns {
        let bad = patterns
            .iter()
            .find(|p| p.is_empty() || glob::Pattern::new(p).is_err())
            .cloned();
        match bad {
            Some(p) => reject(
                "discovery.config_patterns",
                &p,
                "non-empty valid glob patterns",
            ),
            None if patterns.is_empty() => reject(
                "discovery.config_patterns",
                "[]",
                "at least one pattern",
            ),
            None => config.config_patterns = patterns,
        }
    }

    // -- Command: mode --
    if let Some(mode) = raw.command.mode {
        match mode.parse::<CommandMode>() {
            Ok(m) => config.command_mode = m,
            Err(_) => reject("command.mode", &mode, "\"shell\" or \"direct\""),
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            reject(
                "logging.level",
                &level,
                "one of error, warn, info, debug, trace",
            );
        }
    }

    config
}

// =============================================================================
// Anchor and project root
// =============================================================================

/// The two directories every run works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Directory the journal directory is created under.
    pub anchor: PathBuf,
    /// Directory that is scanned and that commands run in by default.
    pub project_root: PathBuf,
}

impl Workspace {
    /// Build from an explicit anchor; the project root is its parent.
    pub fn from_anchor(anchor: PathBuf) -> Self {
        let project_root = anchor.parent().map(Path::to_path_buf).unwrap_or_else(|| anchor.clone());
        Self {
            anchor,
            project_root,
        }
    }

    /// Resolve with priority CLI > config > default.
    ///
    /// The default anchor assumes the helper layout
    /// `<project>/<helper>/<bin>/devassist`: the grandparent of the
    /// executable's directory. Relative paths are made absolute against the
    /// current directory.
    pub fn resolve(
        cli_anchor: Option<&Path>,
        cli_root: Option<&Path>,
        config: &AppConfig,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::NoAnchor { source })?;

        let anchor = match cli_anchor.or(config.anchor.as_deref()) {
            Some(p) => cwd.join(p),
            None => default_anchor().unwrap_or_else(|| cwd.clone()),
        };

        let mut workspace = Self::from_anchor(anchor);
        if let Some(root) = cli_root.or(config.project_root.as_deref()) {
            workspace.project_root = cwd.join(root);
        }

        tracing::debug!(
            anchor = %workspace.anchor.display(),
            project_root = %workspace.project_root.display(),
            "Workspace resolved"
        );
        Ok(workspace)
    }
}

fn default_anchor() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent()?.parent().map(Path::to_path_buf)
}

// =============================================================================
// Tests
// =============================================================================
