//! Unit naming: identifier types and the name sanitizer.
//!
//! User-supplied names end up both in file names and in the tracking tables,
//! so they are reduced to lowercase ASCII alphanumerics and underscores before
//! anything touches the filesystem.

use crate::error::{CoreError, CoreResult};
use crate::newtype_string::define_identifier;
use chrono::{DateTime, Utc};

/// `strftime` pattern for migration versions: 14-digit UTC timestamp.
pub const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// Length of a version rendered with [`VERSION_FORMAT`].
pub const VERSION_LEN: usize = 14;

define_identifier! {
    /// A sanitized unit name: non-empty, `[a-z0-9_]+`.
    pub struct UnitName;
    check = |s| !s.is_empty() && s.bytes().all(is_name_byte);
}

define_identifier! {
    /// A migration version: the leading token of a migration file name.
    ///
    /// Always 14 ASCII digits (a `%Y%m%d%H%M%S` UTC timestamp), so byte-wise
    /// ordering matches chronological order.
    pub struct Version;
    check = |s| s.len() == VERSION_LEN && s.bytes().all(|b| b.is_ascii_digit());
}

impl Version {
    /// Version for a unit created at `now`.
    pub fn from_timestamp(now: DateTime<Utc>) -> Self {
        Self(now.format(VERSION_FORMAT).to_string())
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_'
}

/// Normalize arbitrary input into a filesystem- and SQL-safe unit name.
///
/// Lowercases, turns spaces and hyphens into underscores, then drops every
/// character outside `[a-z0-9_]`. `what` names the unit kind in errors
/// ("migration", "seed").
///
/// Fails with an invalid-argument error when the input is blank or when
/// nothing survives sanitizing.
pub fn sanitize_name(what: &'static str, input: &str) -> CoreResult<UnitName> {
    if input.trim().is_empty() {
        return Err(CoreError::InvalidName {
            what,
            input: input.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }

    let sanitized: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_ascii() && is_name_byte(*c as u8))
        .collect();

    UnitName::try_new(sanitized).ok_or_else(|| CoreError::InvalidName {
        what,
        input: input.to_string(),
        reason: "name has no letters, digits, or underscores".to_string(),
    })
}

#[cfg(test)]
#[path = "naming_test.rs"]
mod tests;
