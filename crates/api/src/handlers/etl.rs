//! Handlers for the `/etl` import endpoints.
//!
//! These run the full import synchronously and report counts when done.
//! Per-item upstream failures are logged and skipped inside the importer;
//! only infrastructure failures (database down, upstream unreachable)
//! surface here.

use axum::extract::State;
use axum::Json;
use episodic_etl::client::CatalogClient;
use rand::SeedableRng;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/etl/run
///
/// Seeds the status taxonomy and imports characters and episodes from the
/// upstream catalog.
pub async fn run(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let client = CatalogClient::new(&state.config.catalog_api_url);
    let mut rng = rand::rngs::StdRng::from_os_rng();

    episodic_etl::import::seed_statuses(&state.pool).await?;
    let characters = episodic_etl::import::import_characters(&state.pool, &client).await?;
    let episodes =
        episodic_etl::import::import_episodes(&state.pool, &client, &mut rng).await?;

    tracing::info!(characters, episodes, "catalog import completed");
    Ok(Json(json!({
        "message": "ETL process completed successfully",
        "characters": characters,
        "episodes": episodes,
    })))
}

/// POST /api/v1/etl/run-participations
///
/// Generates synthetic participations for active episodes. Every generated
/// interval goes through the same pair-locked overlap check as API writes.
pub async fn run_participations(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let mut rng = rand::rngs::StdRng::from_os_rng();
    let created =
        episodic_etl::participations::generate(&state.pool, &mut rng, 5).await?;

    tracing::info!(created, "participation generation completed");
    Ok(Json(json!({
        "message": "Participations process completed successfully",
        "created": created,
    })))
}
