//! Status/category taxonomy partitions.
//!
//! Statuses are partitioned by the entity kind they may attach to
//! (`CHARACTERS` vs `EPISODES`), subcategories by category kind
//! (`SPECIES` vs `SEASON`). The validators reject any reference that
//! resolves into the wrong partition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Owning entity kind for a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKind {
    Characters,
    Episodes,
}

impl StatusKind {
    /// Canonical name as stored in `status_types.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Characters => "CHARACTERS",
            StatusKind::Episodes => "EPISODES",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHARACTERS" => Ok(StatusKind::Characters),
            "EPISODES" => Ok(StatusKind::Episodes),
            other => Err(CoreError::Internal(format!(
                "unknown status type '{other}'"
            ))),
        }
    }
}

/// Category kind a subcategory may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    Species,
    Season,
}

impl CategoryKind {
    /// Canonical name as stored in `categories.name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Species => "SPECIES",
            CategoryKind::Season => "SEASON",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPECIES" => Ok(CategoryKind::Species),
            "SEASON" => Ok(CategoryKind::Season),
            other => Err(CoreError::Internal(format!("unknown category '{other}'"))),
        }
    }
}
