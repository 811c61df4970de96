use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always true while the process is serving requests
    pub ok: bool,
}

/// Liveness check.
///
/// Never touches the cache or MAAS.
#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn ping() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Health check for orchestrators; same answer as `/ping`.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
