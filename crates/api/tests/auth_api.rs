//! HTTP-level integration tests for signup, login and `/auth/me`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, signup};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_returns_token_and_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "Sara@Explora.Test",
        "password": "long-enough",
        "username": "sara",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["token"].is_string());
    assert_eq!(data["expires_in"], 7 * 24 * 60 * 60);
    assert_eq!(data["user"]["email"], "sara@explora.test");
    assert_eq!(data["user"]["city"], "catania");
    assert_eq!(data["user"]["total_score"], 0);
    assert_eq!(data["user"]["preferences_completed"], false);
    assert!(data["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_duplicate_email_is_conflict(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "dup@explora.test").await;

    let body = serde_json::json!({
        "email": "DUP@explora.test",
        "password": "another-password",
        "username": "dup2",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_validation(pool: PgPool) {
    let cases = [
        serde_json::json!({ "email": "not-an-email", "password": "long-enough", "username": "x" }),
        serde_json::json!({ "email": "a@explora.test", "password": "short", "username": "x" }),
        serde_json::json!({ "email": "a@explora.test", "password": "long-enough", "username": "" }),
    ];
    for body in cases {
        let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/signup", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success_and_failure(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "login@explora.test").await;

    let ok = serde_json::json!({ "email": "LOGIN@explora.test", "password": "catania-by-night" });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", ok).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert!(json["data"]["user"]["last_login_at"].is_string());

    let wrong = serde_json::json!({ "email": "login@explora.test", "password": "nope-nope-nope" });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", wrong).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let unknown = serde_json::json!({ "email": "ghost@explora.test", "password": "whatever-123" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", unknown).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (token, user_id) = signup(common::build_test_app(pool.clone()), "me@explora.test").await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["username"], "me");
    assert_eq!(json["data"]["completed_tasks"], serde_json::json!([]));
}
