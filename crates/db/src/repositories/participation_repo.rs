//! Repository for the `participations` table.
//!
//! Mutating operations come in transaction-scoped variants (`*_in`,
//! [`ParticipationRepo::lock_pair`]) so the validator can hold an advisory
//! lock on the `(character, episode)` pair across the overlap scan and the
//! write. Without that lock two concurrent creates could both pass the
//! overlap check against the same snapshot and both insert.

use episodic_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::participation::{CreateParticipation, Participation, ParticipationSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, character_id, episode_id, init, finish, created_at, updated_at";

/// Provides CRUD operations for participations plus the pair-locked
/// transactional variants used by the scheduling validator.
pub struct ParticipationRepo;

impl ParticipationRepo {
    /// Find a participation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Participation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participations WHERE id = $1");
        sqlx::query_as::<_, Participation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List participations with names joined in, filtered by any combination
    /// of episode, character, and timecode bounds.
    ///
    /// The `init >= $3` / `finish <= $4` comparisons run on the stored text
    /// columns. That is equivalent to numeric comparison only because every
    /// stored value is zero-padded `mm:ss` within the two-digit grammar;
    /// values outside that grammar never reach the table.
    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        pool: &PgPool,
        episode_id: Option<DbId>,
        character_id: Option<DbId>,
        init_from: Option<&str>,
        finish_to: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ParticipationSummary>, sqlx::Error> {
        sqlx::query_as::<_, ParticipationSummary>(
            "SELECT p.id, c.name AS character_name, e.title AS episode_title, p.init, p.finish
             FROM participations p
             JOIN characters c ON c.id = p.character_id
             JOIN episodes e ON e.id = p.episode_id
             WHERE ($1::bigint IS NULL OR p.episode_id = $1)
               AND ($2::bigint IS NULL OR p.character_id = $2)
               AND ($3::text IS NULL OR p.init >= $3)
               AND ($4::text IS NULL OR p.finish <= $4)
             ORDER BY p.id ASC
             LIMIT $5 OFFSET $6",
        )
        .bind(episode_id)
        .bind(character_id)
        .bind(init_from)
        .bind(finish_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Take a transaction-scoped advisory lock on one `(character, episode)`
    /// pair. Released automatically at commit or rollback.
    ///
    /// The key folds both IDs into one bigint; collisions across distinct
    /// pairs only cost unnecessary serialization, never a missed conflict.
    pub async fn lock_pair(
        conn: &mut PgConnection,
        character_id: DbId,
        episode_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(($1::bigint << 32) # $2::bigint)")
            .bind(character_id)
            .bind(episode_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Fetch every participation for one `(episode, character)` pair, the
    /// input to the overlap check. Runs on the locking transaction.
    pub async fn list_for_pair(
        conn: &mut PgConnection,
        episode_id: DbId,
        character_id: DbId,
    ) -> Result<Vec<Participation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participations
             WHERE episode_id = $1 AND character_id = $2
             ORDER BY init ASC"
        );
        sqlx::query_as::<_, Participation>(&query)
            .bind(episode_id)
            .bind(character_id)
            .fetch_all(conn)
            .await
    }

    /// Insert a new participation on the locking transaction.
    pub async fn create_in(
        conn: &mut PgConnection,
        input: &CreateParticipation,
    ) -> Result<Participation, sqlx::Error> {
        let query = format!(
            "INSERT INTO participations (character_id, episode_id, init, finish)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participation>(&query)
            .bind(input.character_id)
            .bind(input.episode_id)
            .bind(&input.init)
            .bind(&input.finish)
            .fetch_one(conn)
            .await
    }

    /// Rewrite all four mutable fields of a participation on the locking
    /// transaction. The validator has already defaulted unspecified fields
    /// from the stored row.
    pub async fn update_in(
        conn: &mut PgConnection,
        id: DbId,
        character_id: DbId,
        episode_id: DbId,
        init: &str,
        finish: &str,
    ) -> Result<Option<Participation>, sqlx::Error> {
        let query = format!(
            "UPDATE participations SET
                character_id = $2,
                episode_id = $3,
                init = $4,
                finish = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participation>(&query)
            .bind(id)
            .bind(character_id)
            .bind(episode_id)
            .bind(init)
            .bind(finish)
            .fetch_optional(conn)
            .await
    }

    /// Hard-delete a participation by ID. Returns `true` if a row was removed.
    ///
    /// Deletion is unconditional: no conflict re-check, no cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM participations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
