//! Participation entity model and DTOs.

use episodic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A participation row: one character's timed appearance in one episode.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participation {
    pub id: DbId,
    pub character_id: DbId,
    pub episode_id: DbId,
    /// Appearance start as zero-padded `mm:ss` text.
    pub init: String,
    /// Appearance end as zero-padded `mm:ss` text.
    pub finish: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new participation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipation {
    pub character_id: DbId,
    pub episode_id: DbId,
    pub init: String,
    pub finish: String,
}

/// DTO for updating an existing participation. Unspecified fields keep the
/// stored values of the row being updated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParticipation {
    pub character_id: Option<DbId>,
    pub episode_id: Option<DbId>,
    pub init: Option<String>,
    pub finish: Option<String>,
}

/// A participation shaped for list responses, with names joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParticipationSummary {
    pub id: DbId,
    pub character_name: String,
    pub episode_title: String,
    pub init: String,
    pub finish: String,
}
