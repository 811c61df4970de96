pub mod health;
pub mod maas;
pub mod weather;

use axum::extract::FromRequestParts;
use axum::{routing::get, Router};
use std::sync::Arc;

use crate::errors::AppError;
use crate::services::cache::ResponseCache;
use crate::services::maas::MaasClient;

/// Shared application state for weather endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) cache: Arc<ResponseCache>,
    pub(crate) maas_client: MaasClient,
}

/// `Path` extractor whose rejections are JSON `AppError::BadRequest` bodies.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct ApiPath<T>(pub(crate) T);

/// `Query` extractor whose rejections are JSON `AppError::BadRequest` bodies.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub(crate) struct ApiQuery<T>(pub(crate) T);

/// All API routes. CORS, tracing and the Swagger UI are layered on in `main`.
pub(crate) fn api_router(state: AppState) -> Router {
    let health_routes: Router = Router::new()
        .route("/ping", get(health::ping))
        .route("/healthz", get(health::healthz));

    let weather_routes = Router::new()
        .route("/weather/latest", get(weather::get_latest_weather))
        .route("/weather/:sol", get(weather::get_weather_by_sol))
        .route("/maas", get(maas::get_raw_maas))
        .with_state(state);

    Router::new().merge(health_routes).merge(weather_routes)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    pub(crate) fn state_for(base_url: &str) -> AppState {
        AppState {
            cache: Arc::new(ResponseCache::default()),
            maas_client: MaasClient::new(base_url, "mars-weather-test", Duration::from_secs(5))
                .unwrap(),
        }
    }

    /// Send a GET through the router and return status plus raw body bytes.
    pub(crate) async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }
}
