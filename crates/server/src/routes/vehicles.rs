use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{error, info};

use models::vehicle::Vehicle;
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::response::PrettyJson;
use crate::state::AppState;

/// GET /cars - list every stored vehicle.
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<PrettyJson<Vec<Vehicle>>, ApiError> {
    match state.repo.list().await {
        Ok(vehicles) => {
            info!(count = vehicles.len(), "list vehicles");
            Ok(PrettyJson(vehicles))
        }
        Err(e) => {
            error!(err = %e, "failed to list vehicles");
            Err(ApiError::database())
        }
    }
}

/// POST /cars - store a new vehicle; replies 201 with a Location header
/// pointing at the created record.
pub async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<Vehicle>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Bad payloads never reach the storage layer.
    let vehicle = match payload {
        Ok(Json(vehicle)) => vehicle,
        Err(_) => return Err(ApiError::bad_request("Incorrect body")),
    };
    if let Err(e) = vehicle.validate() {
        return Err(ApiError::bad_request(e.to_string()));
    }

    let vin = vehicle.vin.clone();
    match state.repo.insert(vehicle).await {
        Ok(()) => {
            info!(%vin, "created vehicle");
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, format!("/cars/{vin}"))],
            ))
        }
        Err(ServiceError::DuplicateVin) => {
            Err(ApiError::bad_request("A car with this VIN already exists"))
        }
        Err(e) => {
            error!(err = %e, %vin, "failed to insert vehicle");
            Err(ApiError::database())
        }
    }
}

/// GET /cars/:vin - exact-match lookup.
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<PrettyJson<Vehicle>, ApiError> {
    match state.repo.find_by_vin(&vin).await {
        Ok(Some(vehicle)) => Ok(PrettyJson(vehicle)),
        Ok(None) => Err(ApiError::not_found("Car not found")),
        Err(e) => {
            error!(err = %e, %vin, "failed to find vehicle");
            Err(ApiError::database())
        }
    }
}

/// DELETE /cars/:vin - remove a record; 204 on success.
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.repo.delete_by_vin(&vin).await {
        Ok(true) => {
            info!(%vin, "deleted vehicle");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(ApiError::not_found("Car not found")),
        Err(e) => {
            error!(err = %e, %vin, "failed to delete vehicle");
            Err(ApiError::database())
        }
    }
}
