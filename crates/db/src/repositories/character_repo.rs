//! Repository for the `characters` table.

use episodic_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{
    Character, CharacterParticipation, CharacterRow, CreateCharacter, UpdateCharacter,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, status_id, subcategory_id, created_at, updated_at";

/// Provides CRUD operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (name, status_id, subcategory_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.name)
            .bind(input.status_id)
            .bind(input.subcategory_id)
            .fetch_one(pool)
            .await
    }

    /// Find a character by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List characters with status and species names resolved, optionally
    /// filtered by status and subcategory.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<DbId>,
        subcategory_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        sqlx::query_as::<_, CharacterRow>(
            "SELECT c.id, c.name, s.name AS status, sub.name AS species
             FROM characters c
             JOIN statuses s ON s.id = c.status_id
             JOIN subcategories sub ON sub.id = c.subcategory_id
             WHERE ($1::bigint IS NULL OR c.status_id = $1)
               AND ($2::bigint IS NULL OR c.subcategory_id = $2)
             ORDER BY c.id ASC
             LIMIT $3 OFFSET $4",
        )
        .bind(status_id)
        .bind(subcategory_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Find one character shaped for responses (names resolved).
    pub async fn find_row(pool: &PgPool, id: DbId) -> Result<Option<CharacterRow>, sqlx::Error> {
        sqlx::query_as::<_, CharacterRow>(
            "SELECT c.id, c.name, s.name AS status, sub.name AS species
             FROM characters c
             JOIN statuses s ON s.id = c.status_id
             JOIN subcategories sub ON sub.id = c.subcategory_id
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Fetch the nested participations for a set of characters, episode
    /// titles joined in. One query for a whole listing page.
    pub async fn participations_for(
        pool: &PgPool,
        character_ids: &[DbId],
    ) -> Result<Vec<CharacterParticipation>, sqlx::Error> {
        sqlx::query_as::<_, CharacterParticipation>(
            "SELECT p.character_id, e.title AS episode_title, p.init, p.finish
             FROM participations p
             JOIN episodes e ON e.id = p.episode_id
             WHERE p.character_id = ANY($1)
             ORDER BY p.character_id, p.init",
        )
        .bind(character_ids)
        .fetch_all(pool)
        .await
    }

    /// Find a character with the given name in a subcategory, restricted to
    /// one status and optionally excluding an ID (duplicate-name check).
    pub async fn find_duplicate(
        pool: &PgPool,
        name: &str,
        subcategory_id: DbId,
        status_id: Option<DbId>,
        exclude: Option<DbId>,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE name = $1 AND subcategory_id = $2
               AND ($3::bigint IS NULL OR status_id = $3)
               AND ($4::bigint IS NULL OR id <> $4)
             LIMIT 1"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(name)
            .bind(subcategory_id)
            .bind(status_id)
            .bind(exclude)
            .fetch_optional(pool)
            .await
    }

    /// List characters with the given status (importer input).
    pub async fn list_by_status(
        pool: &PgPool,
        status_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE status_id = $1 ORDER BY id");
        sqlx::query_as::<_, Character>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                status_id = COALESCE($3, status_id),
                subcategory_id = COALESCE($4, subcategory_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.status_id)
            .bind(input.subcategory_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a character to the given lifecycle status (suspension).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }
}
