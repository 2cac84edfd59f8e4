pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /characters                  GET list, POST create
/// /characters/{id}             GET, PUT, DELETE (suspend)
///
/// /episodes                    GET list, POST create
/// /episodes/{id}               GET, PUT, DELETE (cancel)
///
/// /participations              GET list, POST create
/// /participations/{id}         GET, PUT, DELETE
///
/// /etl/run                     POST full catalog import
/// /etl/run-participations      POST synthetic participation generation
/// ```
pub fn api_routes() -> Router<AppState> {
    let character_routes = Router::new()
        .route(
            "/",
            get(handlers::character::list).post(handlers::character::create),
        )
        .route(
            "/{id}",
            get(handlers::character::get_by_id)
                .put(handlers::character::update)
                .delete(handlers::character::delete),
        );

    let episode_routes = Router::new()
        .route(
            "/",
            get(handlers::episode::list).post(handlers::episode::create),
        )
        .route(
            "/{id}",
            get(handlers::episode::get_by_id)
                .put(handlers::episode::update)
                .delete(handlers::episode::delete),
        );

    let participation_routes = Router::new()
        .route(
            "/",
            get(handlers::participation::list).post(handlers::participation::create),
        )
        .route(
            "/{id}",
            get(handlers::participation::get_by_id)
                .put(handlers::participation::update)
                .delete(handlers::participation::delete),
        );

    let etl_routes = Router::new()
        .route("/run", post(handlers::etl::run))
        .route("/run-participations", post(handlers::etl::run_participations));

    Router::new()
        .nest("/characters", character_routes)
        .nest("/episodes", episode_routes)
        .nest("/participations", participation_routes)
        .nest("/etl", etl_routes)
}
