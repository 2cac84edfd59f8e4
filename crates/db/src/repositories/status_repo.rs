//! Repository for the `statuses` and `status_types` tables.

use episodic_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::{Status, StatusType, StatusWithType};

/// Lookup and seeding operations for the status taxonomy.
pub struct StatusRepo;

impl StatusRepo {
    /// Find a status joined with its owning type. Used by the taxonomy guard.
    pub async fn find_with_type(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StatusWithType>, sqlx::Error> {
        sqlx::query_as::<_, StatusWithType>(
            "SELECT s.id, s.name, s.status_type_id, t.type
             FROM statuses s
             JOIN status_types t ON t.id = s.status_type_id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a status by name within one type partition.
    ///
    /// Used to resolve lifecycle statuses (e.g. `SUSPENDED` for characters)
    /// without hard-coding seed-order IDs.
    pub async fn find_by_name_and_type(
        pool: &PgPool,
        name: &str,
        type_name: &str,
    ) -> Result<Option<Status>, sqlx::Error> {
        sqlx::query_as::<_, Status>(
            "SELECT s.id, s.name, s.status_type_id
             FROM statuses s
             JOIN status_types t ON t.id = s.status_type_id
             WHERE s.name = $1 AND t.type = $2",
        )
        .bind(name)
        .bind(type_name)
        .fetch_optional(pool)
        .await
    }

    /// Insert a status type if absent, returning the row either way.
    pub async fn upsert_type(pool: &PgPool, type_name: &str) -> Result<StatusType, sqlx::Error> {
        sqlx::query_as::<_, StatusType>(
            "INSERT INTO status_types (type) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_status_types_type DO UPDATE SET type = EXCLUDED.type
             RETURNING id, type",
        )
        .bind(type_name)
        .fetch_one(pool)
        .await
    }

    /// Insert a status if absent, returning the row either way.
    pub async fn upsert(
        pool: &PgPool,
        name: &str,
        status_type_id: DbId,
    ) -> Result<Status, sqlx::Error> {
        sqlx::query_as::<_, Status>(
            "INSERT INTO statuses (name, status_type_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_statuses_name_type DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name, status_type_id",
        )
        .bind(name)
        .bind(status_type_id)
        .fetch_one(pool)
        .await
    }
}
