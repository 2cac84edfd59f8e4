//! Validation pipeline for episode create/update.

use episodic_core::error::CoreError;
use episodic_core::taxonomy::{CategoryKind, StatusKind};
use episodic_core::timecode::Timecode;
use episodic_core::types::DbId;
use episodic_db::models::episode::{CreateEpisode, Episode, UpdateEpisode};
use episodic_db::repositories::{EpisodeRepo, StatusRepo};
use episodic_db::DbPool;

use crate::error::AppResult;
use crate::validators::TaxonomyGuard;

/// Lifecycle status name used by episode deletion.
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// Runs the create/update pipelines for episodes.
pub struct EpisodeValidator;

impl EpisodeValidator {
    /// Validate a new episode: unique title within the season, status and
    /// subcategory in the correct partitions, well-formed duration.
    pub async fn validate_create(pool: &DbPool, input: &CreateEpisode) -> AppResult<()> {
        let duplicate =
            EpisodeRepo::find_duplicate(pool, &input.title, input.subcategory_id, None).await?;
        if duplicate.is_some() {
            return Err(CoreError::Conflict(
                "episode with this title already exists in the same season".to_string(),
            )
            .into());
        }

        TaxonomyGuard::require_status_of(pool, StatusKind::Episodes, input.status_id).await?;
        TaxonomyGuard::require_subcategory_of(pool, CategoryKind::Season, input.subcategory_id)
            .await?;

        Timecode::parse(&input.duration)?;
        Ok(())
    }

    /// Validate an update against the stored row.
    pub async fn validate_update(
        pool: &DbPool,
        current: &Episode,
        input: &UpdateEpisode,
    ) -> AppResult<()> {
        if let Some(title) = &input.title {
            let subcategory_id = input.subcategory_id.unwrap_or(current.subcategory_id);
            let duplicate =
                EpisodeRepo::find_duplicate(pool, title, subcategory_id, Some(current.id)).await?;
            if duplicate.is_some() {
                return Err(CoreError::Conflict(
                    "episode with this title already exists in the same season".to_string(),
                )
                .into());
            }
        }

        if let Some(status_id) = input.status_id {
            TaxonomyGuard::require_status_of(pool, StatusKind::Episodes, status_id).await?;
        }
        if let Some(subcategory_id) = input.subcategory_id {
            TaxonomyGuard::require_subcategory_of(pool, CategoryKind::Season, subcategory_id)
                .await?;
        }
        if let Some(duration) = &input.duration {
            Timecode::parse(duration)?;
        }
        Ok(())
    }

    /// Resolve the `CANCELLED` status used by episode deletion.
    pub async fn cancelled_status_id(pool: &DbPool) -> AppResult<DbId> {
        let status = StatusRepo::find_by_name_and_type(
            pool,
            STATUS_CANCELLED,
            StatusKind::Episodes.as_str(),
        )
        .await?
        .ok_or_else(|| {
            CoreError::Internal("CANCELLED status is not seeded for EPISODES".to_string())
        })?;
        Ok(status.id)
    }
}
