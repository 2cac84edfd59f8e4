//! HTTP-level integration tests for the character endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_character_returns_201(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({
            "name": "Rick",
            "status_id": seeded.character_active,
            "subcategory_id": seeded.species,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Rick");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_active_duplicate_is_a_conflict(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    common::seed_character(&pool, &seeded, "Rick").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({
            "name": "Rick",
            "status_id": seeded.character_active,
            "subcategory_id": seeded.species,
        }),
    )
    .await;

    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_status_from_wrong_partition(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;

    // An EPISODES status is not valid for a character.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({
            "name": "Rick",
            "status_id": seeded.episode_active,
            "subcategory_id": seeded.species,
        }),
    )
    .await;

    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_character_includes_participations(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let character = common::seed_character(&pool, &seeded, "Rick").await;
    let episode = common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/participations",
        serde_json::json!({
            "character_id": character,
            "episode_id": episode,
            "init": "01:00",
            "finish": "01:30",
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/characters/{character}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Rick");
    assert_eq!(json["status"], "ACTIVE");
    assert_eq!(json["species"], "Human");
    let participations = json["participations"].as_array().unwrap();
    assert_eq!(participations.len(), 1);
    assert_eq!(participations[0]["episode_title"], "Pilot");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_character_returns_404(pool: PgPool) {
    common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/characters/999999").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_characters_paginates(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    for name in ["A", "B", "C", "D", "E", "F", "G"] {
        common::seed_character(&pool, &seeded, name).await;
    }

    // Default page size is 5.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/characters").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 5);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/characters?page=2").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_rejects_out_of_range_limit(pool: PgPool) {
    common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/characters?limit=500").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_rejects_unknown_status_filter(pool: PgPool) {
    common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/characters?type_id=999999").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_character_name(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_character(&pool, &seeded, "Rick").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/characters/{id}"),
        serde_json::json!({"name": "Rick Prime"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Rick Prime");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_to_duplicate_name_is_a_conflict(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    common::seed_character(&pool, &seeded, "Rick").await;
    let id = common::seed_character(&pool, &seeded, "Morty").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/characters/{id}"),
        serde_json::json!({"name": "Rick"}),
    )
    .await;

    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

// ---------------------------------------------------------------------------
// Delete (suspension)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_suspends_instead_of_removing(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_character(&pool, &seeded, "Rick").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status_id"], seeded.character_suspended);

    // Still retrievable, now suspended.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "SUSPENDED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_already_suspended_is_a_conflict(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_character(&pool, &seeded, "Rick").await;

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/characters/{id}")).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/characters/{id}")).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_suspended_name_can_be_reused(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_character(&pool, &seeded, "Rick").await;

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/characters/{id}")).await;

    // The duplicate check only counts active characters.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({
            "name": "Rick",
            "status_id": seeded.character_active,
            "subcategory_id": seeded.species,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
