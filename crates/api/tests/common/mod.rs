use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use episodic_api::config::ServerConfig;
use episodic_api::router::build_app_router;
use episodic_api::state::AppState;
use episodic_core::types::DbId;
use episodic_db::models::character::CreateCharacter;
use episodic_db::models::episode::CreateEpisode;
use episodic_db::repositories::{
    CategoryRepo, CharacterRepo, EpisodeRepo, StatusRepo, SubcategoryRepo,
};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        catalog_api_url: "http://localhost:9".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This reuses the router construction from `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard error envelope and return it.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
    json
}

// ---------------------------------------------------------------------------
// Database seeding
// ---------------------------------------------------------------------------

/// IDs of the seeded taxonomy rows tests build entities on top of.
pub struct Seeded {
    pub character_active: DbId,
    pub character_suspended: DbId,
    pub episode_active: DbId,
    pub episode_cancelled: DbId,
    pub species: DbId,
    pub season: DbId,
}

/// Seed the status taxonomy plus one species and one season subcategory.
pub async fn seed_taxonomy(pool: &PgPool) -> Seeded {
    episodic_etl::import::seed_statuses(pool).await.unwrap();

    let species_category = CategoryRepo::upsert(pool, "SPECIES").await.unwrap();
    let species = SubcategoryRepo::upsert(pool, "Human", species_category.id)
        .await
        .unwrap();
    let season_category = CategoryRepo::upsert(pool, "SEASON").await.unwrap();
    let season = SubcategoryRepo::upsert(pool, "Season 1", season_category.id)
        .await
        .unwrap();

    Seeded {
        character_active: status_id(pool, "ACTIVE", "CHARACTERS").await,
        character_suspended: status_id(pool, "SUSPENDED", "CHARACTERS").await,
        episode_active: status_id(pool, "ACTIVE", "EPISODES").await,
        episode_cancelled: status_id(pool, "CANCELLED", "EPISODES").await,
        species: species.id,
        season: season.id,
    }
}

async fn status_id(pool: &PgPool, name: &str, kind: &str) -> DbId {
    StatusRepo::find_by_name_and_type(pool, name, kind)
        .await
        .unwrap()
        .unwrap()
        .id
}

/// Insert a character through the repository layer (test setup shortcut).
pub async fn seed_character(pool: &PgPool, seeded: &Seeded, name: &str) -> DbId {
    CharacterRepo::create(
        pool,
        &CreateCharacter {
            name: name.to_string(),
            status_id: seeded.character_active,
            subcategory_id: seeded.species,
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert an episode through the repository layer (test setup shortcut).
pub async fn seed_episode(pool: &PgPool, seeded: &Seeded, title: &str) -> DbId {
    EpisodeRepo::create(
        pool,
        &CreateEpisode {
            title: title.to_string(),
            duration: "45:00".to_string(),
            status_id: seeded.episode_active,
            subcategory_id: seeded.season,
        },
    )
    .await
    .unwrap()
    .id
}
