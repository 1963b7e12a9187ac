/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations applied on first connect)
/// - Router construction with a fixed test configuration
/// - Request/response helpers built on `tower::Service::call`
/// - Unique test email generation
///
/// Tests require a running PostgreSQL database reachable through the
/// `DATABASE_URL` environment variable. When the variable is absent the
/// tests skip rather than fail, so the unit suite stays green on machines
/// without a database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, TaskConfig};
use tower::Service as _;

/// Signing secret used by every test router
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-0123456789abcdef";

static EMAIL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Test context containing the database pool and a ready router
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a test context with the default shared-board configuration
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> anyhow::Result<Option<Self>> {
        Self::with_owner_scoped(false).await
    }

    /// Creates a test context with owner-scoped task listing enabled
    pub async fn owner_scoped() -> anyhow::Result<Option<Self>> {
        Self::with_owner_scoped(true).await
    }

    async fn with_owner_scoped(owner_scoped: bool) -> anyhow::Result<Option<Self>> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping integration test");
            return Ok(None);
        };

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                ttl_minutes: 30,
            },
            tasks: TaskConfig { owner_scoped },
        };

        let db = PgPool::connect(&database_url).await?;

        // Path relative to the taskdeck-api crate root
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Some(TestContext { db, app, config }))
    }
}

/// Generates an email address unique across the test run
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let count = EMAIL_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}@example.com", prefix, nanos, count)
}

/// Sends a request through the router and returns status plus parsed body
///
/// An empty body parses as JSON null.
pub async fn send(ctx: &TestContext, request: Request<Body>) -> (StatusCode, Value) {
    let response = ctx
        .app
        .clone()
        .call(request)
        .await
        .expect("router call should not fail");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    (status, body)
}

/// Builds a JSON request, optionally with a bearer token
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Builds a GET/DELETE request with no body
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::empty()).expect("request should build")
}

/// Registers a user and returns the response body
pub async fn register_user(ctx: &TestContext, email: &str, password: &str) -> Value {
    let (status, body) = send(
        ctx,
        json_request(
            "POST",
            "/users/",
            None,
            &serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body
}

/// Logs in with form credentials and returns the bearer token
pub async fn login_user(ctx: &TestContext, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/token")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            email, password
        )))
        .expect("request should build");

    let (status, body) = send(ctx, request).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    assert_eq!(body["token_type"], "bearer");

    body["access_token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// Creates a task through the API and returns the response body
pub async fn create_task(ctx: &TestContext, token: &str, payload: Value) -> Value {
    let (status, body) = send(ctx, json_request("POST", "/tasks/", Some(token), &payload)).await;
    assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
    body
}
