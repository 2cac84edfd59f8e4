//! Character entity model and DTOs.

use episodic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub status_id: DbId,
    pub subcategory_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub status_id: DbId,
    pub subcategory_id: DbId,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub status_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
}

/// A character shaped for API responses: status and species resolved to
/// names, participations nested with their episode titles.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterDetail {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub species: String,
    pub participations: Vec<CharacterParticipation>,
}

/// One appearance of a character, as nested in [`CharacterDetail`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterParticipation {
    #[serde(skip)]
    pub character_id: DbId,
    pub episode_title: String,
    pub init: String,
    pub finish: String,
}

/// Flat row backing [`CharacterDetail`] before participations are attached.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterRow {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub species: String,
}
