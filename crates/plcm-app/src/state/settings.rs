//! Application settings - persisted user preferences.
//!
//! Settings are loaded from disk at startup and saved when changed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::logging::{LogFormat, LogLevel};

/// File name of the settings file inside the config directory.
const SETTINGS_FILE: &str = "settings.toml";

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// Application settings.
///
/// Serialized to TOML and stored in the user's config directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// General application settings.
    pub general: GeneralSettings,

    /// Logging defaults (CLI flags take precedence).
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a specific path.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed settings at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::settings(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::settings(format!("Failed to serialize settings: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| AppError::settings(format!("Failed to write settings: {e}")))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "PlcMonitor", "PlcMonitor")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }
}

// =============================================================================
// RECENT PROJECT
// =============================================================================

/// A recently opened or saved project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentProject {
    /// Path to the .plcson project file.
    pub path: PathBuf,

    /// Display name (file stem).
    pub display_name: String,

    /// When the project was last opened or saved.
    pub last_opened: DateTime<Utc>,
}

impl RecentProject {
    /// Create a new recent project entry stamped now.
    pub fn new(path: PathBuf, display_name: impl Into<String>) -> Self {
        Self {
            path,
            display_name: display_name.into(),
            last_opened: Utc::now(),
        }
    }

    /// Check if the project file still exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Get relative time string (e.g., "2 hours ago", "Yesterday").
    pub fn relative_time(&self) -> String {
        self.relative_time_at(Utc::now())
    }

    fn relative_time_at(&self, now: DateTime<Utc>) -> String {
        let duration = now.signed_duration_since(self.last_opened);

        if duration.num_minutes() < 1 {
            "Just now".to_string()
        } else if duration.num_minutes() < 60 {
            let mins = duration.num_minutes();
            format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
        } else if duration.num_hours() < 24 {
            let hours = duration.num_hours();
            format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
        } else if duration.num_days() == 1 {
            "Yesterday".to_string()
        } else if duration.num_days() < 7 {
            format!("{} days ago", duration.num_days())
        } else {
            self.last_opened.format("%b %d, %Y").to_string()
        }
    }
}

// =============================================================================
// GENERAL SETTINGS
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Maximum number of recent projects to remember.
    pub max_recent_projects: usize,

    /// Recent projects, most recent first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recent_projects: Vec<RecentProject>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            max_recent_projects: 10,
            recent_projects: Vec::new(),
        }
    }
}

impl GeneralSettings {
    /// Add or refresh a project.
    ///
    /// An entry with the same path is updated and moved to the front.
    /// Respects `max_recent_projects`.
    pub fn add_recent_project(&mut self, project: RecentProject) {
        self.recent_projects.retain(|p| p.path != project.path);
        self.recent_projects.insert(0, project);
        self.recent_projects.truncate(self.max_recent_projects);
    }

    /// Remove stale projects (those with missing paths).
    pub fn prune_stale_projects(&mut self) {
        self.recent_projects.retain(RecentProject::exists);
    }

    /// Get recent projects sorted by last_opened (most recent first).
    pub fn recent_projects_sorted(&self) -> Vec<&RecentProject> {
        let mut sorted: Vec<&RecentProject> = self.recent_projects.iter().collect();
        sorted.sort_by(|a, b| b.last_opened.cmp(&a.last_opened));
        sorted
    }
}

// =============================================================================
// LOGGING SETTINGS
// =============================================================================

/// Persisted logging defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Fixed level; when unset, `RUST_LOG` decides and the default is `warn`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    pub format: LogFormat,
    /// Write logs here instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}
