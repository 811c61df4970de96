//! Weather resolution service.
//!
//! Each endpoint follows the same pipeline: cache lookup, single MAAS fetch
//! on a miss, validation, optional normalization, cache store.
//!
//! Normalized and raw documents live under separate key namespaces:
//!
//! - `latest`, `sol:<N>`: normalized records
//! - `maas:latest`, `maas:sol:<N>`: raw MAAS documents
//!
//! Concurrent misses for the same key may each reach MAAS; the last write wins.

use serde_json::Value;

use crate::errors::AppError;
use crate::helpers::{has_error_marker, is_truthy};
use crate::services::cache::ResponseCache;
use crate::services::maas::{maas_path, MaasClient};
use crate::services::normalize::normalize;

pub const LATEST_KEY: &str = "latest";

/// Cache key for a normalized sol report.
pub fn sol_key(sol: i64) -> String {
    format!("sol:{}", sol)
}

/// Cache key for a raw MAAS document (`sol == 0` is the latest report).
pub fn raw_key(sol: i64) -> String {
    if sol == 0 {
        format!("maas:{}", LATEST_KEY)
    } else {
        format!("maas:{}", sol_key(sol))
    }
}

/// Normalized report for the most recent sol.
pub async fn resolve_latest(cache: &ResponseCache, client: &MaasClient) -> Result<Value, AppError> {
    resolve_normalized(cache, client, LATEST_KEY, None).await
}

/// Normalized report for a specific sol.
pub async fn resolve_sol(
    cache: &ResponseCache,
    client: &MaasClient,
    sol: i64,
) -> Result<Value, AppError> {
    resolve_normalized(cache, client, &sol_key(sol), Some(sol)).await
}

/// Raw MAAS document, `sol == 0` meaning the latest report.
///
/// Only an empty document is rejected, with a gateway error rather than
/// not-found; error markers pass through untouched.
pub async fn resolve_raw(
    cache: &ResponseCache,
    client: &MaasClient,
    sol: i64,
) -> Result<Value, AppError> {
    if sol < 0 {
        return Err(AppError::BadRequest(format!(
            "sol must be greater than or equal to 0, got {}",
            sol
        )));
    }

    let key = raw_key(sol);
    if let Some(hit) = cache.get(&key).await {
        tracing::debug!("Cache hit for '{}'", key);
        return Ok(hit);
    }

    let path = maas_path((sol != 0).then_some(sol));
    let data = client.fetch(&path).await?;
    if !is_truthy(&data) {
        return Err(AppError::EmptyUpstreamResponse);
    }

    cache.set(key.clone(), data.clone()).await;
    tracing::debug!("Cached '{}' ({} entries)", key, cache.len().await);
    Ok(data)
}

async fn resolve_normalized(
    cache: &ResponseCache,
    client: &MaasClient,
    key: &str,
    sol: Option<i64>,
) -> Result<Value, AppError> {
    if let Some(hit) = cache.get(key).await {
        tracing::debug!("Cache hit for '{}'", key);
        return Ok(hit);
    }
    tracing::debug!("Cache miss for '{}'", key);

    let data = client.fetch(&maas_path(sol)).await?;
    if !is_truthy(&data) || has_error_marker(&data) {
        let message = match sol {
            Some(sol) => format!("No data for sol {}", sol),
            None => "No data for the latest sol".to_string(),
        };
        return Err(AppError::NotFound(message));
    }

    // Cache the serialized form so hits and misses produce identical bodies.
    let out = serde_json::to_value(normalize(&data))
        .map_err(|e| AppError::InternalError(format!("Failed to serialize weather: {}", e)))?;
    cache.set(key, out.clone()).await;
    tracing::debug!("Cached '{}' ({} entries)", key, cache.len().await);
    Ok(out)
}
