use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use service::devices::DeviceService;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::{metrics, openapi::ApiDoc};

pub mod devices;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub devices: DeviceService,
}

impl AppState {
    pub fn new(devices: DeviceService) -> Self {
        Self { devices }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: device API, health, metrics and docs.
pub fn build_router(state: AppState, cors: CorsLayer, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/api/v1/devices", post(devices::create))
        .route("/api/v1/devices/:id", get(devices::get).delete(devices::delete));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                // keeps a client-supplied x-request-id, otherwise assigns a UUID
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(
                            DefaultMakeSpan::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .include_headers(false),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(TimeoutLayer::new(request_timeout)),
        )
}
