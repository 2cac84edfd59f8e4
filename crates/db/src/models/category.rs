//! Category taxonomy models (`categories` and `subcategories` tables).

use episodic_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A category row (`SPECIES` or `SEASON`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// A subcategory row: a species for characters, a season for episodes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subcategory {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
}

/// A subcategory joined with its owning category, used by the taxonomy guard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubcategoryWithCategory {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
    pub category_name: String,
}
