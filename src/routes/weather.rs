//! Normalized weather endpoints.
//!
//! - GET /weather/latest
//! - GET /weather/:sol

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::errors::{AppError, ErrorResponse};
use crate::routes::{ApiPath, AppState};
use crate::services::normalize::NormalizedWeather;
use crate::services::weather::{resolve_latest, resolve_sol};

/// Get the normalized report for the most recent sol.
///
/// Served from the in-memory cache for up to 15 minutes after a successful
/// MAAS fetch.
#[utoipa::path(
    get,
    path = "/weather/latest",
    tag = "Weather",
    responses(
        (status = 200, description = "Latest normalized report", body = NormalizedWeather),
        (status = 404, description = "MAAS has no data for the latest sol", body = ErrorResponse),
        (status = 502, description = "MAAS unreachable or returned an error", body = ErrorResponse),
    )
)]
pub async fn get_latest_weather(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let weather = resolve_latest(&state.cache, &state.maas_client).await?;
    Ok(Json(weather))
}

/// Get the normalized report for a specific sol.
#[utoipa::path(
    get,
    path = "/weather/{sol}",
    tag = "Weather",
    params(
        ("sol" = i64, Path, description = "Sol number"),
    ),
    responses(
        (status = 200, description = "Normalized report for the sol", body = NormalizedWeather),
        (status = 400, description = "Sol is not an integer", body = ErrorResponse),
        (status = 404, description = "MAAS has no data for the sol", body = ErrorResponse),
        (status = 502, description = "MAAS unreachable or returned an error", body = ErrorResponse),
    )
)]
pub async fn get_weather_by_sol(
    State(state): State<AppState>,
    ApiPath(sol): ApiPath<i64>,
) -> Result<Json<Value>, AppError> {
    let weather = resolve_sol(&state.cache, &state.maas_client, sol).await?;
    Ok(Json(weather))
}
