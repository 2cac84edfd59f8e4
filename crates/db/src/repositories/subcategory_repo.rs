//! Repository for the `subcategories` table.

use episodic_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Subcategory, SubcategoryWithCategory};

/// Lookup and seeding operations for subcategories (species, seasons).
pub struct SubcategoryRepo;

impl SubcategoryRepo {
    /// Find a subcategory joined with its owning category. Used by the
    /// taxonomy guard.
    pub async fn find_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SubcategoryWithCategory>, sqlx::Error> {
        sqlx::query_as::<_, SubcategoryWithCategory>(
            "SELECT s.id, s.name, s.category_id, c.name AS category_name
             FROM subcategories s
             JOIN categories c ON c.id = s.category_id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Insert a subcategory if absent, returning the row either way.
    pub async fn upsert(
        pool: &PgPool,
        name: &str,
        category_id: DbId,
    ) -> Result<Subcategory, sqlx::Error> {
        sqlx::query_as::<_, Subcategory>(
            "INSERT INTO subcategories (name, category_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_subcategories_name_category
                 DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name, category_id",
        )
        .bind(name)
        .bind(category_id)
        .fetch_one(pool)
        .await
    }
}
