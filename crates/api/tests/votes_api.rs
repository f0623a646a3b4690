//! Integration tests for the vote endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, get_auth, post_json, post_json_auth, token_for, StubProfileSource};
use serde_json::json;
use sqlx::PgPool;
use xeno_core::types::DbId;

/// App with three registered users; returns their ids.
async fn app_with_users(pool: PgPool) -> (Router, [DbId; 3]) {
    let stub = Arc::new(StubProfileSource::default());
    for handle in ["voter_a", "voter_b", "target"] {
        stub.set(handle, 100, 10);
    }
    let app = common::build_test_app_with(pool, stub);

    let mut ids = [0; 3];
    for (slot, handle) in ids.iter_mut().zip(["voter_a", "voter_b", "target"]) {
        let body = json!({ "handle": handle });
        let json = body_json(post_json(app.clone(), "/api/v1/profiles", body).await).await;
        *slot = json["data"]["id"].as_i64().unwrap();
    }
    (app, ids)
}

async fn vote(
    app: &Router,
    voter: DbId,
    target: DbId,
    value: i64,
) -> (StatusCode, serde_json::Value) {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/votes",
        json!({ "target_id": target, "value": value }),
        &token_for(voter),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn score(app: &Router, id: DbId) -> i64 {
    let card = body_json(get(app.clone(), &format!("/api/v1/users/{id}")).await).await;
    card["data"]["reputation_score"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_sequence_moves_score(pool: PgPool) {
    let (app, [a, b, target]) = app_with_users(pool).await;

    let (status, json) = vote(&app, a, target, 1).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["transition"], "created");
    assert_eq!(json["data"]["target_score"], 1);

    let (status, _) = vote(&app, b, target, 1).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(score(&app, target).await, 2);

    let (status, json) = vote(&app, a, target, -1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["transition"], "flipped");
    assert_eq!(json["data"]["score_delta"], -2);
    assert_eq!(json["data"]["target_score"], 0);
    assert_eq!(score(&app, target).await, 0);

    let response = get(app, &format!("/api/v1/users/{target}/votes/summary")).await;
    let summary = body_json(response).await;
    assert_eq!(summary["data"]["upvotes"], 1);
    assert_eq!(summary["data"]["downvotes"], 1);
    assert_eq!(summary["data"]["net"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_vote_is_conflict_and_keeps_score(pool: PgPool) {
    let (app, [a, _, target]) = app_with_users(pool).await;
    vote(&app, a, target, 1).await;

    for _ in 0..5 {
        let (status, json) = vote(&app, a, target, 1).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], "DUPLICATE_VOTE");
    }
    assert_eq!(score(&app, target).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn self_vote_is_conflict(pool: PgPool) {
    let (app, [a, _, _]) = app_with_users(pool).await;

    let (status, json) = vote(&app, a, a, 1).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "SELF_VOTE");
    assert_eq!(score(&app, a).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_value_is_bad_request(pool: PgPool) {
    let (app, [a, _, target]) = app_with_users(pool).await;

    for value in [0, 2, -5] {
        let (status, json) = vote(&app, a, target, value).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
    assert_eq!(score(&app, target).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_integer_value_is_bad_request_with_error_body(pool: PgPool) {
    let (app, [a, _, target]) = app_with_users(pool).await;

    for value in [json!("up"), json!(1.5), json!(null), json!(true)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/votes",
            json!({ "target_id": target, "value": value }),
            &token_for(a),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("expected 1 or -1"), "got {message}");
    }
    assert_eq!(score(&app, target).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_target_or_voter_is_not_found(pool: PgPool) {
    let (app, [a, _, target]) = app_with_users(pool).await;

    let (status, _) = vote(&app, a, 987_654, 1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = vote(&app, 987_654, target, 1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(score(&app, target).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn voting_requires_a_valid_token(pool: PgPool) {
    let (app, [_, _, target]) = app_with_users(pool).await;

    let missing = post_json(
        app.clone(),
        "/api/v1/votes",
        json!({ "target_id": target, "value": 1 }),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let forged = post_json_auth(
        app,
        "/api/v1/votes",
        json!({ "target_id": target, "value": 1 }),
        "not.a.token",
    )
    .await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(forged).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn caller_vote_lookup(pool: PgPool) {
    let (app, [a, b, target]) = app_with_users(pool).await;
    vote(&app, a, target, -1).await;

    let path = format!("/api/v1/votes/{target}");
    let mine = get_auth(app.clone(), &path, &token_for(a)).await;
    assert_eq!(mine.status(), StatusCode::OK);
    let mine = body_json(mine).await;
    assert_eq!(mine["data"]["value"], -1);
    assert_eq!(mine["data"]["voter_id"], a);

    let none = get_auth(app, &path, &token_for(b)).await;
    assert_eq!(none.status(), StatusCode::NO_CONTENT);
}
