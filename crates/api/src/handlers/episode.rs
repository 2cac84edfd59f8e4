//! Handlers for the `/episodes` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use episodic_core::error::CoreError;
use episodic_core::taxonomy::CategoryKind;
use episodic_core::timecode::Timecode;
use episodic_core::types::DbId;
use episodic_db::models::episode::{
    CreateEpisode, Episode, EpisodeDetail, EpisodeRow, UpdateEpisode,
};
use episodic_db::repositories::EpisodeRepo;
use episodic_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;
use crate::validators::{EpisodeValidator, TaxonomyGuard};

/// Query parameters for `GET /episodes`.
#[derive(Debug, Deserialize)]
pub struct EpisodeListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    /// Filter by season subcategory.
    pub season_id: Option<DbId>,
}

/// POST /api/v1/episodes
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateEpisode>,
) -> AppResult<(StatusCode, Json<Episode>)> {
    EpisodeValidator::validate_create(&state.pool, &input).await?;

    // Store the canonical zero-padded rendering; stored durations must stay
    // within the two-digit grammar.
    input.duration = Timecode::parse(&input.duration)?.to_string();

    let episode = EpisodeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(episode)))
}

/// GET /api/v1/episodes
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EpisodeListParams>,
) -> AppResult<Json<Vec<EpisodeDetail>>> {
    params.pagination.check()?;

    if let Some(season_id) = params.season_id {
        TaxonomyGuard::require_subcategory_of(&state.pool, CategoryKind::Season, season_id)
            .await?;
    }

    let rows = EpisodeRepo::list(
        &state.pool,
        params.season_id,
        params.pagination.limit,
        params.pagination.offset(),
    )
    .await?;

    Ok(Json(attach_participations(&state.pool, rows).await?))
}

/// GET /api/v1/episodes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EpisodeDetail>> {
    let row = EpisodeRepo::find_row(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;

    let mut details = attach_participations(&state.pool, vec![row]).await?;
    let detail = details
        .pop()
        .ok_or_else(|| AppError::InternalError("episode detail vanished".to_string()))?;
    Ok(Json(detail))
}

/// PUT /api/v1/episodes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateEpisode>,
) -> AppResult<Json<Episode>> {
    let current = EpisodeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;

    EpisodeValidator::validate_update(&state.pool, &current, &input).await?;

    input.duration = input
        .duration
        .as_deref()
        .map(Timecode::parse)
        .transpose()?
        .map(|t| t.to_string());

    let episode = EpisodeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;
    Ok(Json(episode))
}

/// DELETE /api/v1/episodes/{id}
///
/// Episodes are never removed; deletion moves them to `CANCELLED`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Episode>> {
    let current = EpisodeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;

    let cancelled = EpisodeValidator::cancelled_status_id(&state.pool).await?;
    if current.status_id == cancelled {
        return Err(CoreError::Conflict("episode is already cancelled".to_string()).into());
    }

    let episode = EpisodeRepo::set_status(&state.pool, id, cancelled)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;
    Ok(Json(episode))
}

/// Group the participations for a page of episodes under their owners.
async fn attach_participations(
    pool: &DbPool,
    rows: Vec<EpisodeRow>,
) -> AppResult<Vec<EpisodeDetail>> {
    let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
    let mut grouped: HashMap<DbId, Vec<_>> = HashMap::new();
    for participation in EpisodeRepo::participations_for(pool, &ids).await? {
        grouped
            .entry(participation.episode_id)
            .or_default()
            .push(participation);
    }

    Ok(rows
        .into_iter()
        .map(|row| EpisodeDetail {
            participations: grouped.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            status: row.status,
            season: row.season,
        })
        .collect())
}
