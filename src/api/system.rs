//! Service info and health endpoints.
use crate::api::error::{api_internal, ApiError};
use crate::api::types::{HealthStatus, ServiceInfo};
use crate::app::AppState;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service metadata", body = ServiceInfo))
)]
pub(crate) async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        success: true,
        message: "studymate API server is running".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        status: "running".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Store reachable", body = HealthStatus),
        (status = 500, description = "Store unavailable", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    state
        .store
        .health_check()
        .await
        .map_err(|err| api_internal("health check failed", &err))?;
    Ok(Json(HealthStatus {
        status: "OK".into(),
    }))
}
