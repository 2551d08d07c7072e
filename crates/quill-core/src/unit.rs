//! Units discovered on disk: paired migrations and single-file seeds.

use crate::naming::Version;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Migration script direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// File name suffix carrying this direction.
    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Up => ".up.sql",
            Direction::Down => ".down.sql",
        }
    }

    /// Direction named by a file's suffix, if any.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        [Direction::Up, Direction::Down]
            .into_iter()
            .find(|d| file_name.ends_with(d.suffix()))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// One versioned migration with its (possibly incomplete) script pair.
///
/// A unit may be discovered with only one direction present. That is not a
/// discovery error; it surfaces when the missing direction is actually needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationUnit {
    pub version: Version,
    pub name: String,
    pub up_script: Option<PathBuf>,
    pub down_script: Option<PathBuf>,
}

impl MigrationUnit {
    pub fn new(version: Version, name: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
            up_script: None,
            down_script: None,
        }
    }

    /// Script for `direction`, if present on disk.
    pub fn script(&self, direction: Direction) -> Option<&Path> {
        match direction {
            Direction::Up => self.up_script.as_deref(),
            Direction::Down => self.down_script.as_deref(),
        }
    }

    pub(crate) fn set_script(&mut self, direction: Direction, path: PathBuf) {
        match direction {
            Direction::Up => self.up_script = Some(path),
            Direction::Down => self.down_script = Some(path),
        }
    }

    /// True when both directions are present.
    pub fn is_complete(&self) -> bool {
        self.up_script.is_some() && self.down_script.is_some()
    }
}

/// One seed script, identified by its file name (extension included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedUnit {
    pub file_name: String,
    pub script: PathBuf,
}
