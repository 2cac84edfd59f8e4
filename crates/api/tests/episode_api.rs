//! HTTP-level integration tests for the episode endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_episode_returns_201(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/episodes",
        serde_json::json!({
            "title": "Pilot",
            "duration": "22:00",
            "status_id": seeded.episode_active,
            "subcategory_id": seeded.season,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Pilot");
    assert_eq!(json["duration"], "22:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_normalizes_single_digit_duration(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/episodes",
        serde_json::json!({
            "title": "Pilot",
            "duration": "5:07",
            "status_id": seeded.episode_active,
            "subcategory_id": seeded.season,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    // Stored form is always zero-padded.
    assert_eq!(json["duration"], "05:07");

    let stored: String = sqlx::query_scalar("SELECT duration FROM episodes WHERE id = $1")
        .bind(json["id"].as_i64().unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "05:07");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_malformed_duration(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/episodes",
        serde_json::json!({
            "title": "Pilot",
            "duration": "75:00",
            "status_id": seeded.episode_active,
            "subcategory_id": seeded.season,
        }),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "FORMAT_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_duplicate_title_in_season_is_a_conflict(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/episodes",
        serde_json::json!({
            "title": "Pilot",
            "duration": "22:00",
            "status_id": seeded.episode_active,
            "subcategory_id": seeded.season,
        }),
    )
    .await;

    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_subcategory_from_wrong_category(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;

    // A species subcategory is not a season.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/episodes",
        serde_json::json!({
            "title": "Pilot",
            "duration": "22:00",
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
async fn test_get_episode_includes_participations(pool: PgPool) {
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
    let response = get(app, &format!("/api/v1/episodes/{episode}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Pilot");
    assert_eq!(json["season"], "Season 1");
    let participations = json["participations"].as_array().unwrap();
    assert_eq!(participations.len(), 1);
    assert_eq!(participations[0]["character_name"], "Rick");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_episode_returns_404(pool: PgPool) {
    common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/episodes/999999").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_rejects_unknown_season_filter(pool: PgPool) {
    common::seed_taxonomy(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/episodes?season_id=999999").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_episode_duration(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/episodes/{id}"),
        serde_json::json!({"duration": "30:00"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["duration"], "30:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_normalizes_single_digit_duration(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/episodes/{id}"),
        serde_json::json!({"duration": "9:05"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["duration"], "09:05");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_malformed_duration(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/episodes/{id}"),
        serde_json::json!({"duration": "1:2:3"}),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "FORMAT_ERROR").await;
}

// ---------------------------------------------------------------------------
// Delete (cancellation)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_cancels_instead_of_removing(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/episodes/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status_id"], seeded.episode_cancelled);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/episodes/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "CANCELLED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_already_cancelled_is_a_conflict(pool: PgPool) {
    let seeded = common::seed_taxonomy(&pool).await;
    let id = common::seed_episode(&pool, &seeded, "Pilot").await;

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/episodes/{id}")).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/episodes/{id}")).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancelled_episode_keeps_its_participations(pool: PgPool) {
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

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/episodes/{episode}")).await;

    // Cancellation is a status change, not a removal; nothing cascades.
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/participations?episode_id={episode}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}
