//! HTTP-level integration tests for preference setup, fetch and update.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, preferences_body, put_json_auth, signup};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_setup_links_preferences(pool: PgPool) {
    let (token, user_id) = signup(common::build_test_app(pool.clone()), "p@explora.test").await;

    let body = preferences_body(&["karaoke", "club"], serde_json::json!({ "karaoke": 90 }));
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/preferences/setup",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["user_id"], user_id);
    assert_eq!(data["profile"]["age"], 27);
    assert_eq!(data["profile"]["travel_style"], "moderate");
    assert_eq!(data["travel_preferences"]["travel_pace"], "slow");
    assert_eq!(data["travel_preferences"]["accommodation_type"], "airbnb");
    assert_eq!(data["event_preferences"]["preferred_time"], "night");
    assert_eq!(data["event_preferences"]["group_or_solo"], "both");

    let me = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/auth/me", &token).await,
    )
    .await;
    assert_eq!(me["data"]["preferences_id"], data["id"]);
    assert_eq!(me["data"]["preferences_completed"], true);

    let fetched = get_auth(common::build_test_app(pool), "/api/v1/preferences", &token).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["data"]["id"], data["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_setup_is_conflict(pool: PgPool) {
    let (token, _) = signup(common::build_test_app(pool.clone()), "twice@explora.test").await;
    let body = preferences_body(&["museum"], serde_json::json!({}));

    let first = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/preferences/setup",
        body.clone(),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/preferences/setup",
        body,
        &token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_setup_rejects_bad_favorites(pool: PgPool) {
    let (token, _) = signup(common::build_test_app(pool.clone()), "bad@explora.test").await;

    for favorites in [
        vec![],
        vec!["karaoke", "club", "museum", "concert"],
        vec!["club", "club"],
    ] {
        let body = preferences_body(&favorites, serde_json::json!({}));
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/preferences/setup",
            body,
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "favorites {favorites:?}");
    }

    let body = preferences_body(&["club"], serde_json::json!({ "club": 140 }));
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/preferences/setup",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was stored.
    let fetched = get_auth(common::build_test_app(pool), "/api/v1/preferences", &token).await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_sections(pool: PgPool) {
    let (token, _) = signup(common::build_test_app(pool.clone()), "edit@explora.test").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/preferences/setup",
        preferences_body(&["theater"], serde_json::json!({ "theater": 60 })),
        &token,
    )
    .await;

    let update = serde_json::json!({
        "event_preferences": {
            "categories": { "concert": 75 },
            "top_3_favorites": ["concert", "aperitif"]
        }
    });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/preferences",
        update,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let event_prefs = &json["data"]["event_preferences"];
    assert_eq!(event_prefs["categories"], serde_json::json!({ "concert": 75 }));
    assert_eq!(event_prefs["top_3_favorites"], serde_json::json!(["concert", "aperitif"]));
    // Replaced wholesale, so omitted fields fall back to defaults.
    assert_eq!(event_prefs["preferred_time"], "evening");
    // Untouched sections survive.
    assert_eq!(json["data"]["profile"]["bio"], "night owl");

    let empty = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/preferences",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_without_setup_is_not_found(pool: PgPool) {
    let (token, _) = signup(common::build_test_app(pool.clone()), "none@explora.test").await;
    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/preferences",
        serde_json::json!({ "share_profile": true }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
