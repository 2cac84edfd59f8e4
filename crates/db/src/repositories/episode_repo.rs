//! Repository for the `episodes` table.

use episodic_core::types::DbId;
use sqlx::PgPool;

use crate::models::episode::{
    CreateEpisode, Episode, EpisodeParticipation, EpisodeRow, UpdateEpisode,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, duration, status_id, subcategory_id, created_at, updated_at";

/// Provides CRUD operations for episodes.
pub struct EpisodeRepo;

impl EpisodeRepo {
    /// Insert a new episode, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEpisode) -> Result<Episode, sqlx::Error> {
        let query = format!(
            "INSERT INTO episodes (title, duration, status_id, subcategory_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(&input.title)
            .bind(&input.duration)
            .bind(input.status_id)
            .bind(input.subcategory_id)
            .fetch_one(pool)
            .await
    }

    /// Find an episode by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE id = $1");
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List episodes with status and season names resolved, optionally
    /// filtered by season subcategory.
    pub async fn list(
        pool: &PgPool,
        subcategory_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EpisodeRow>, sqlx::Error> {
        sqlx::query_as::<_, EpisodeRow>(
            "SELECT e.id, e.title, s.name AS status, sub.name AS season
             FROM episodes e
             JOIN statuses s ON s.id = e.status_id
             JOIN subcategories sub ON sub.id = e.subcategory_id
             WHERE ($1::bigint IS NULL OR e.subcategory_id = $1)
             ORDER BY e.id ASC
             LIMIT $2 OFFSET $3",
        )
        .bind(subcategory_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Find one episode shaped for responses (names resolved).
    pub async fn find_row(pool: &PgPool, id: DbId) -> Result<Option<EpisodeRow>, sqlx::Error> {
        sqlx::query_as::<_, EpisodeRow>(
            "SELECT e.id, e.title, s.name AS status, sub.name AS season
             FROM episodes e
             JOIN statuses s ON s.id = e.status_id
             JOIN subcategories sub ON sub.id = e.subcategory_id
             WHERE e.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Fetch the nested participations for a set of episodes, character
    /// names joined in. One query for a whole listing page.
    pub async fn participations_for(
        pool: &PgPool,
        episode_ids: &[DbId],
    ) -> Result<Vec<EpisodeParticipation>, sqlx::Error> {
        sqlx::query_as::<_, EpisodeParticipation>(
            "SELECT p.episode_id, c.name AS character_name, p.init, p.finish
             FROM participations p
             JOIN characters c ON c.id = p.character_id
             WHERE p.episode_id = ANY($1)
             ORDER BY p.episode_id, p.init",
        )
        .bind(episode_ids)
        .fetch_all(pool)
        .await
    }

    /// Find an episode with the given title in a season, optionally
    /// excluding an ID (duplicate-title check).
    pub async fn find_duplicate(
        pool: &PgPool,
        title: &str,
        subcategory_id: DbId,
        exclude: Option<DbId>,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM episodes
             WHERE title = $1 AND subcategory_id = $2
               AND ($3::bigint IS NULL OR id <> $3)
             LIMIT 1"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(title)
            .bind(subcategory_id)
            .bind(exclude)
            .fetch_optional(pool)
            .await
    }

    /// List episodes with the given status (importer input).
    pub async fn list_by_status(
        pool: &PgPool,
        status_id: DbId,
    ) -> Result<Vec<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE status_id = $1 ORDER BY id");
        sqlx::query_as::<_, Episode>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Update an episode. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEpisode,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "UPDATE episodes SET
                title = COALESCE($2, title),
                duration = COALESCE($3, duration),
                status_id = COALESCE($4, status_id),
                subcategory_id = COALESCE($5, subcategory_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.duration)
            .bind(input.status_id)
            .bind(input.subcategory_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an episode to the given lifecycle status (cancellation).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: DbId,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "UPDATE episodes SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }
}
