use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::Service;

static HEALTHY: &str = "healthy";

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Welcome message and liveness
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = RootResponse)
    )
)]
pub async fn get_root(State(service): State<Service>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", service.name),
        version: service.version,
        status: HEALTHY.to_string(),
    })
}

/// Liveness
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn get_health(State(service): State<Service>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY.to_string(),
        service: service.name,
        version: service.version,
    })
}
