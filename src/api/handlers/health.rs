use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use utoipa::ToSchema;

const SERVICE_NAME: &str = "product_catalog";

/// Basic health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Storage readiness response
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    fn new(status: &str, storage: &str, error: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            service: SERVICE_NAME.to_string(),
            storage: storage.to_string(),
            error,
        }
    }
}

/// GET /health
/// Liveness check; never touches storage
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// GET /health/ready
/// Readiness probe; pings the database when one is configured
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Option<PgPool>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let Some(pool) = pool else {
        return (
            StatusCode::OK,
            Json(ReadinessResponse::new("ready", "memory", None)),
        );
    };

    let db_check = tokio::time::timeout(
        Duration::from_secs(2),
        sqlx::query("SELECT 1").fetch_one(&pool),
    )
    .await;

    match db_check {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(ReadinessResponse::new("ready", "connected", None)),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse::new(
                    "not_ready",
                    "disconnected",
                    Some(sanitize_db_error(&e).to_string()),
                )),
            )
        }
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse::new(
                "not_ready",
                "timeout",
                Some("Database query timed out after 2 seconds".to_string()),
            )),
        ),
    }
}

/// Coarse description of a driver error, safe to return to callers
fn sanitize_db_error(error: &sqlx::Error) -> &'static str {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error",
        sqlx::Error::Io(_) => "Database connection error",
        sqlx::Error::Tls(_) => "Database TLS error",
        sqlx::Error::PoolTimedOut => "Database pool timeout",
        sqlx::Error::PoolClosed => "Database pool closed",
        sqlx::Error::Protocol(_) => "Database protocol error",
        _ => "Database error",
    }
}
