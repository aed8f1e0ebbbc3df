//! Configuration consumed by the core
//!
//! The host process owns where these values come from (settings screen,
//! config file, environment); the core only consumes them.

use serde::{Deserialize, Serialize};

/// Defaults applied to clone options the transport payload omits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloneDefaults {
    #[serde(default = "default_true")]
    pub create_backup: bool,
    #[serde(default)]
    pub overwrite_existing: bool,
}

impl Default for CloneDefaults {
    fn default() -> Self {
        Self {
            create_backup: true,
            overwrite_existing: false,
        }
    }
}

/// Limits on how many/how-old backups are kept per record. A `None` limit
/// disables that rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetentionPolicy {
    #[serde(default = "default_max_age_days")]
    pub max_age_days: Option<i64>,
    #[serde(default = "default_max_per_record")]
    pub max_per_record: Option<usize>,
}

impl RetentionPolicy {
    /// Keep everything forever.
    pub fn unlimited() -> Self {
        Self {
            max_age_days: None,
            max_per_record: None,
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
            max_per_record: default_max_per_record(),
        }
    }
}

/// Process-wide configuration block.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub defaults: CloneDefaults,
    #[serde(default)]
    pub retention: RetentionPolicy,
}

fn default_true() -> bool {
    true
}

fn default_max_age_days() -> Option<i64> {
    Some(30)
}

fn default_max_per_record() -> Option<usize> {
    Some(10)
}
