//! Episode entity model and DTOs.

use episodic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An episode row from the `episodes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Episode {
    pub id: DbId,
    pub title: String,
    /// Runtime as zero-padded `mm:ss` text.
    pub duration: String,
    pub status_id: DbId,
    pub subcategory_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new episode.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEpisode {
    pub title: String,
    pub duration: String,
    pub status_id: DbId,
    pub subcategory_id: DbId,
}

/// DTO for updating an existing episode. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEpisode {
    pub title: Option<String>,
    pub duration: Option<String>,
    pub status_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
}

/// An episode shaped for API responses: status and season resolved to
/// names, participations nested with their character names.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeDetail {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub season: String,
    pub participations: Vec<EpisodeParticipation>,
}

/// One appearance within an episode, as nested in [`EpisodeDetail`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EpisodeParticipation {
    #[serde(skip)]
    pub episode_id: DbId,
    pub character_name: String,
    pub init: String,
    pub finish: String,
}

/// Flat row backing [`EpisodeDetail`] before participations are attached.
#[derive(Debug, Clone, FromRow)]
pub struct EpisodeRow {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub season: String,
}
