#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use xeno_api::auth::jwt::{issue_token, JwtConfig};
use xeno_api::config::ServerConfig;
use xeno_api::router::build_app_router;
use xeno_api::state::AppState;
use xeno_core::persona::PersonaCatalog;
use xeno_core::types::DbId;
use xeno_social::{FetchedProfile, ProfileFetchError, ProfileSource, RapidApiConfig};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        persona_catalog_path: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_mins: 60,
        },
        rapidapi: RapidApiConfig::new("test-key".into(), "rapidapi.invalid".into()),
    }
}

/// In-memory profile source keyed by handle.
///
/// Unknown handles are reported as not found. A handle registered with
/// [`StubProfileSource::fail`] returns that error instead.
#[derive(Default)]
pub struct StubProfileSource {
    profiles: Mutex<HashMap<String, FetchedProfile>>,
    failures: Mutex<HashMap<String, fn() -> ProfileFetchError>>,
}

impl StubProfileSource {
    pub fn set(&self, handle: &str, follower_count: i64, post_count: i64) {
        let profile = FetchedProfile {
            display_name: Some(format!("{handle} display")),
            avatar_url: None,
            follower_count,
            post_count,
        };
        self.profiles
            .lock()
            .unwrap()
            .insert(handle.to_string(), profile);
    }

    pub fn fail(&self, handle: &str, error: fn() -> ProfileFetchError) {
        self.failures
            .lock()
            .unwrap()
            .insert(handle.to_string(), error);
    }
}

#[async_trait]
impl ProfileSource for StubProfileSource {
    async fn fetch_profile(&self, handle: &str) -> Result<FetchedProfile, ProfileFetchError> {
        if let Some(error) = self.failures.lock().unwrap().get(handle) {
            return Err(error());
        }
        self.profiles
            .lock()
            .unwrap()
            .get(handle)
            .cloned()
            .ok_or_else(|| ProfileFetchError::NotFound(handle.to_string()))
    }
}

/// Build the full application router with the given profile source.
///
/// Uses [`build_app_router`] so tests exercise the same middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app_with(pool: PgPool, profiles: Arc<StubProfileSource>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog: Arc::new(PersonaCatalog::builtin().unwrap()),
        profiles,
    };
    build_app_router(state, &config)
}

/// Build the app with an empty profile source.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubProfileSource::default()))
}

/// Bearer token for the given user id, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    issue_token(user_id, &test_config().jwt).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
