//! Validation pipeline for character create/update.

use episodic_core::error::CoreError;
use episodic_core::taxonomy::{CategoryKind, StatusKind};
use episodic_core::types::DbId;
use episodic_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use episodic_db::repositories::{CharacterRepo, StatusRepo};
use episodic_db::DbPool;

use crate::error::AppResult;
use crate::validators::TaxonomyGuard;

/// Lifecycle status names within the `CHARACTERS` partition.
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_SUSPENDED: &str = "SUSPENDED";

/// Runs the create/update pipelines for characters.
pub struct CharacterValidator;

impl CharacterValidator {
    /// Validate a new character: no active duplicate within the species,
    /// status and subcategory in the correct partitions.
    pub async fn validate_create(pool: &DbPool, input: &CreateCharacter) -> AppResult<()> {
        let active =
            StatusRepo::find_by_name_and_type(pool, STATUS_ACTIVE, StatusKind::Characters.as_str())
                .await?;

        if let Some(active) = active {
            let duplicate = CharacterRepo::find_duplicate(
                pool,
                &input.name,
                input.subcategory_id,
                Some(active.id),
                None,
            )
            .await?;
            if duplicate.is_some() {
                return Err(CoreError::Conflict(
                    "character with this name already exists in the same species and is active"
                        .to_string(),
                )
                .into());
            }
        }

        TaxonomyGuard::require_status_of(pool, StatusKind::Characters, input.status_id).await?;
        TaxonomyGuard::require_subcategory_of(pool, CategoryKind::Species, input.subcategory_id)
            .await?;
        Ok(())
    }

    /// Validate an update against the stored row. Unspecified fields keep
    /// their current values for the duplicate check.
    pub async fn validate_update(
        pool: &DbPool,
        current: &Character,
        input: &UpdateCharacter,
    ) -> AppResult<()> {
        if let Some(name) = &input.name {
            let subcategory_id = input.subcategory_id.unwrap_or(current.subcategory_id);
            let duplicate = CharacterRepo::find_duplicate(
                pool,
                name,
                subcategory_id,
                None,
                Some(current.id),
            )
            .await?;
            if duplicate.is_some() {
                return Err(CoreError::Conflict(
                    "character with this name already exists in the same species".to_string(),
                )
                .into());
            }
        }

        if let Some(status_id) = input.status_id {
            TaxonomyGuard::require_status_of(pool, StatusKind::Characters, status_id).await?;
        }
        if let Some(subcategory_id) = input.subcategory_id {
            TaxonomyGuard::require_subcategory_of(pool, CategoryKind::Species, subcategory_id)
                .await?;
        }
        Ok(())
    }

    /// Resolve the `SUSPENDED` status used by character deletion.
    pub async fn suspended_status_id(pool: &DbPool) -> AppResult<DbId> {
        let status = StatusRepo::find_by_name_and_type(
            pool,
            STATUS_SUSPENDED,
            StatusKind::Characters.as_str(),
        )
        .await?
        .ok_or_else(|| {
            CoreError::Internal("SUSPENDED status is not seeded for CHARACTERS".to_string())
        })?;
        Ok(status.id)
    }
}
