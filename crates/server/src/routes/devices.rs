use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::devices::{Device, NewDevice};

use crate::{errors::ApiError, metrics, routes::AppState};

/// Count the outcome of a device operation and refresh the stored gauge.
fn observe<T>(state: &AppState, operation: &str, result: &Result<T, ApiError>, success: &str) {
    let outcome = match result {
        Ok(_) => success,
        Err(e) => e.outcome(),
    };
    metrics::record(operation, outcome);
    metrics::set_stored(state.devices.stored());
}

#[utoipa::path(
    post, path = "/api/v1/devices", tag = "devices",
    request_body = crate::openapi::NewDeviceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DeviceDoc),
        (status = 400, description = "Malformed request"),
        (status = 503, description = "Store is full")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewDevice>, JsonRejection>,
) -> Result<(StatusCode, Json<Device>), ApiError> {
    let result = payload
        .map_err(ApiError::from)
        .and_then(|Json(input)| state.devices.create(input).map_err(ApiError::from));
    observe(&state, "create", &result, "created");
    let device = result?;
    Ok((StatusCode::CREATED, Json(device)))
}

#[utoipa::path(
    get, path = "/api/v1/devices/{id}", tag = "devices",
    params(("id" = String, Path, description = "Device ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DeviceDoc),
        (status = 400, description = "Blank id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    let result = state.devices.get(&id).map_err(ApiError::from);
    observe(&state, "get", &result, "found");
    Ok(Json(result?))
}

#[utoipa::path(
    delete, path = "/api/v1/devices/{id}", tag = "devices",
    params(("id" = String, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeviceDoc),
        (status = 400, description = "Blank id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError> {
    let result = state.devices.delete(&id).map_err(ApiError::from);
    observe(&state, "delete", &result, "deleted");
    Ok(Json(result?))
}
