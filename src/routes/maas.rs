//! Raw MAAS passthrough.
//!
//! GET /maas?sol=N returns the MAAS document unchanged; `sol=0` (the default)
//! is the latest report.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::errors::{AppError, ErrorResponse};
use crate::routes::{ApiQuery, AppState};
use crate::services::weather::resolve_raw;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaasQuery {
    /// Sol number; 0 or omitted for the latest report
    #[serde(default)]
    pub sol: i64,
}

/// Get a raw MAAS document without normalization.
#[utoipa::path(
    get,
    path = "/maas",
    tag = "MAAS",
    params(MaasQuery),
    responses(
        (status = 200, description = "MAAS document, unchanged"),
        (status = 400, description = "Negative or non-integer sol", body = ErrorResponse),
        (status = 502, description = "MAAS unreachable or returned an empty document", body = ErrorResponse),
    )
)]
pub async fn get_raw_maas(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MaasQuery>,
) -> Result<Json<Value>, AppError> {
    let data = resolve_raw(&state.cache, &state.maas_client, params.sol).await?;
    Ok(Json(data))
}

#[cfg(test)]
mod tests {
    use crate::routes::api_router;
    use crate::routes::test_support::{get, state_for};
    use axum::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_default_sol_fetches_latest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "sol": "3996", "min_temp": "-72" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get(api_router(state_for(&server.uri())), "/maas").await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "sol": "3996", "min_temp": "-72" }));
    }

    #[tokio::test]
    async fn test_sol_query_fetches_sol_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sol": "7" })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, _) = get(api_router(state_for(&server.uri())), "/maas?sol=7").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_negative_sol_is_bad_request() {
        let server = MockServer::start().await;
        let (status, _) = get(api_router(state_for(&server.uri())), "/maas?sol=-3").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_integer_sol_is_json_bad_request() {
        let server = MockServer::start().await;
        let (status, body) = get(api_router(state_for(&server.uri())), "/maas?sol=x").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_document_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let (status, body) = get(api_router(state_for(&server.uri())), "/maas").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Empty MAAS response");
    }
}
