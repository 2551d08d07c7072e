//! Run reports and per-unit status rows.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Whether a unit has been recorded as applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitState {
    Applied,
    Pending,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitState::Applied => write!(f, "applied"),
            UnitState::Pending => write!(f, "pending"),
        }
    }
}

/// One discovered migration and its tracking state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationStatus {
    pub version: String,
    pub name: String,
    pub state: UnitState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<NaiveDateTime>,
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.version, self.name, self.state)
    }
}

/// One discovered seed and its tracking state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedStatus {
    pub file_name: String,
    pub state: UnitState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<NaiveDateTime>,
}

impl fmt::Display for SeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.file_name, self.state)
    }
}

/// Identities of the units an `up`, `down`, or `seed` run touched, in the
/// order they were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub units: Vec<String>,
}

impl RunReport {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
