//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::Category;

/// Lookup and seeding operations for top-level categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category if absent, returning the row either way.
    pub async fn upsert(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_categories_name DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
