//! Handlers for the `/characters` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use episodic_core::error::CoreError;
use episodic_core::taxonomy::{CategoryKind, StatusKind};
use episodic_core::types::DbId;
use episodic_db::models::character::{
    Character, CharacterDetail, CharacterRow, CreateCharacter, UpdateCharacter,
};
use episodic_db::repositories::CharacterRepo;
use episodic_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;
use crate::validators::{CharacterValidator, TaxonomyGuard};

/// Query parameters for `GET /characters`.
#[derive(Debug, Deserialize)]
pub struct CharacterListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    /// Filter by lifecycle status.
    pub type_id: Option<DbId>,
    /// Filter by species subcategory.
    pub species_id: Option<DbId>,
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    CharacterValidator::validate_create(&state.pool, &input).await?;
    let character = CharacterRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/v1/characters
///
/// Filter references are themselves guarded: an unknown or wrong-partition
/// `type_id`/`species_id` is an error, not an empty result.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CharacterListParams>,
) -> AppResult<Json<Vec<CharacterDetail>>> {
    params.pagination.check()?;

    if let Some(type_id) = params.type_id {
        TaxonomyGuard::require_status_of(&state.pool, StatusKind::Characters, type_id).await?;
    }
    if let Some(species_id) = params.species_id {
        TaxonomyGuard::require_subcategory_of(&state.pool, CategoryKind::Species, species_id)
            .await?;
    }

    let rows = CharacterRepo::list(
        &state.pool,
        params.type_id,
        params.species_id,
        params.pagination.limit,
        params.pagination.offset(),
    )
    .await?;

    Ok(Json(attach_participations(&state.pool, rows).await?))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterDetail>> {
    let row = CharacterRepo::find_row(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let mut details = attach_participations(&state.pool, vec![row]).await?;
    // attach_participations preserves its input rows one-to-one.
    let detail = details
        .pop()
        .ok_or_else(|| AppError::InternalError("character detail vanished".to_string()))?;
    Ok(Json(detail))
}

/// PUT /api/v1/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    let current = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    CharacterValidator::validate_update(&state.pool, &current, &input).await?;

    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// DELETE /api/v1/characters/{id}
///
/// Characters are never removed; deletion moves them to `SUSPENDED`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Character>> {
    let current = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let suspended = CharacterValidator::suspended_status_id(&state.pool).await?;
    if current.status_id == suspended {
        return Err(CoreError::Conflict("character is already suspended".to_string()).into());
    }

    let character = CharacterRepo::set_status(&state.pool, id, suspended)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// Group the participations for a page of characters under their owners.
async fn attach_participations(
    pool: &DbPool,
    rows: Vec<CharacterRow>,
) -> AppResult<Vec<CharacterDetail>> {
    let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
    let mut grouped: HashMap<DbId, Vec<_>> = HashMap::new();
    for participation in CharacterRepo::participations_for(pool, &ids).await? {
        grouped
            .entry(participation.character_id)
            .or_default()
            .push(participation);
    }

    Ok(rows
        .into_iter()
        .map(|row| CharacterDetail {
            participations: grouped.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            status: row.status,
            species: row.species,
        })
        .collect())
}
