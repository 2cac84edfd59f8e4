//! Handlers for the `/participations` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use episodic_core::error::CoreError;
use episodic_core::timecode::Timecode;
use episodic_core::types::DbId;
use episodic_db::models::participation::{
    CreateParticipation, Participation, ParticipationSummary, UpdateParticipation,
};
use episodic_db::repositories::ParticipationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;
use crate::validators::ParticipationValidator;

/// Query parameters for `GET /participations`.
#[derive(Debug, Deserialize)]
pub struct ParticipationListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    pub episode_id: Option<DbId>,
    pub character_id: Option<DbId>,
    /// Lower bound on `init` (inclusive), `mm:ss`.
    pub init: Option<String>,
    /// Upper bound on `finish` (inclusive), `mm:ss`.
    pub finish: Option<String>,
}

/// POST /api/v1/participations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateParticipation>,
) -> AppResult<(StatusCode, Json<Participation>)> {
    let participation = ParticipationValidator::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(participation)))
}

/// GET /api/v1/participations
///
/// Timecode bounds are parsed and re-rendered before they reach the query,
/// so the text-column comparison always sees canonical zero-padded values.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ParticipationListParams>,
) -> AppResult<Json<Vec<ParticipationSummary>>> {
    params.pagination.check()?;

    let init_from = params
        .init
        .as_deref()
        .map(Timecode::parse)
        .transpose()?
        .map(|t| t.to_string());
    let finish_to = params
        .finish
        .as_deref()
        .map(Timecode::parse)
        .transpose()?
        .map(|t| t.to_string());

    let participations = ParticipationRepo::list(
        &state.pool,
        params.episode_id,
        params.character_id,
        init_from.as_deref(),
        finish_to.as_deref(),
        params.pagination.limit,
        params.pagination.offset(),
    )
    .await?;
    Ok(Json(participations))
}

/// GET /api/v1/participations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Participation>> {
    let participation = ParticipationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Participation",
            id,
        }))?;
    Ok(Json(participation))
}

/// PUT /api/v1/participations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateParticipation>,
) -> AppResult<Json<Participation>> {
    let participation = ParticipationValidator::update(&state.pool, id, &input).await?;
    Ok(Json(participation))
}

/// DELETE /api/v1/participations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ParticipationValidator::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
