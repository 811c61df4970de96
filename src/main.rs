// Mars Weather API v1.0
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod routes;
mod services;

use config::{AppConfig, LogFormat};
use routes::AppState;
use services::cache::ResponseCache;
use services::maas::MaasClient;

/// OpenAPI document for the Curiosity MAAS Weather API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Curiosity MAAS Weather API",
        version = "1.0.0",
        description = "Mars weather from the Curiosity rover's REMS instrument. \
            Fetches reports from the MAAS API, normalizes them into a stable schema \
            and caches them in memory for 15 minutes to spare the upstream service.",
    ),
    tags(
        (name = "Health", description = "Liveness checks"),
        (name = "Weather", description = "Normalized, cached weather reports"),
        (name = "MAAS", description = "Raw MAAS passthrough"),
    ),
    paths(
        routes::health::ping,
        routes::health::healthz,
        routes::weather::get_latest_weather,
        routes::weather::get_weather_by_sol,
        routes::maas::get_raw_maas,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            services::normalize::NormalizedWeather,
            services::normalize::TemperatureC,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mars_weather_api=debug,tower_http=debug".into()),
    );

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Invalid configuration");

    init_tracing(config.log_format);

    let maas_client = MaasClient::new(
        &config.maas_base,
        &config.maas_user_agent,
        Duration::from_secs(config.maas_timeout_secs),
    )
    .expect("Failed to build MAAS client");
    tracing::info!(
        "Using MAAS at {} (timeout {}s)",
        maas_client.base_url(),
        config.maas_timeout_secs
    );

    let cache = Arc::new(ResponseCache::new(chrono::Duration::seconds(
        config.cache_ttl_secs,
    )));
    tracing::info!("Caching MAAS responses for {}s", cache.ttl().num_seconds());

    let app_state = AppState { cache, maas_client };

    // Any origin, method and header, with credentials. Wildcards are not
    // allowed together with credentials, so request values are mirrored.
    let cors = CorsLayer::very_permissive();

    let app = routes::api_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
