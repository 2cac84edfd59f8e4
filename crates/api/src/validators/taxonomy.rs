//! Guards that verify a foreign reference lands in the correct taxonomy
//! partition before it is attached to an entity.

use episodic_core::error::CoreError;
use episodic_core::taxonomy::{CategoryKind, StatusKind};
use episodic_core::types::DbId;
use episodic_db::repositories::{StatusRepo, SubcategoryRepo};
use episodic_db::DbPool;

use crate::error::AppResult;

/// Partition-membership checks shared by the character and episode validators.
pub struct TaxonomyGuard;

impl TaxonomyGuard {
    /// Fail unless `status_id` resolves to a status owned by `kind`.
    pub async fn require_status_of(
        pool: &DbPool,
        kind: StatusKind,
        status_id: DbId,
    ) -> AppResult<()> {
        let status = StatusRepo::find_with_type(pool, status_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Status",
                id: status_id,
            })?;

        if status.kind != kind.as_str() {
            return Err(CoreError::Conflict(format!(
                "status {status_id} does not belong to {kind} type"
            ))
            .into());
        }

        Ok(())
    }

    /// Fail unless `subcategory_id` resolves to a subcategory owned by `kind`.
    pub async fn require_subcategory_of(
        pool: &DbPool,
        kind: CategoryKind,
        subcategory_id: DbId,
    ) -> AppResult<()> {
        let subcategory = SubcategoryRepo::find_with_category(pool, subcategory_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Subcategory",
                id: subcategory_id,
            })?;

        if subcategory.category_name != kind.as_str() {
            return Err(CoreError::Conflict(format!(
                "subcategory {subcategory_id} does not belong to {kind} category"
            ))
            .into());
        }

        Ok(())
    }
}
