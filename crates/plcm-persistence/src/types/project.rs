//! Root project file type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlcSnapshot;

/// Root project file structure.
///
/// This is the top-level type that gets serialized to .plcson files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the project was created (RFC 3339).
    pub created_at: String,

    /// When the project was last saved (RFC 3339).
    pub last_saved_at: String,

    /// Monitored PLCs, in display order.
    #[serde(default)]
    pub plcs: Vec<PlcSnapshot>,
}

impl ProjectFile {
    /// Create an empty project file stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            schema_version: super::CURRENT_SCHEMA_VERSION,
            created_at: now.clone(),
            last_saved_at: now,
            plcs: Vec::new(),
        }
    }

    /// Builder-style helper for assembling a project in one expression.
    #[must_use]
    pub fn with_plcs(mut self, plcs: Vec<PlcSnapshot>) -> Self {
        self.plcs = plcs;
        self
    }

    /// Update the last saved timestamp.
    pub fn touch(&mut self) {
        self.last_saved_at = Utc::now().to_rfc3339();
    }

    /// Parse the created_at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Parse the last_saved_at timestamp.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Total number of variables across all PLCs.
    pub fn variable_count(&self) -> usize {
        self.plcs.iter().map(PlcSnapshot::variable_count).sum()
    }
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self::new()
    }
}
