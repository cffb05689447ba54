//! Vehicle API handlers

use crate::api::location_header;
use crate::domain::{CreateVehicleInput, StringUuid, UpdateVehicleInput, VehicleFilter};
use crate::middleware::{AuthUser, FleetAdmin};
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use motorpool_common::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use motorpool_common::extract::{ApiJson, ApiPath, ApiQuery};
use motorpool_common::Result;

/// List vehicles, optionally filtered by brand and owner
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(PaginationQuery, VehicleFilter),
    responses(
        (status = 200, description = "Page of vehicles, newest first"),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
    ApiQuery(filter): ApiQuery<VehicleFilter>,
) -> Result<impl IntoResponse> {
    let (vehicles, total) = state
        .vehicle_service()
        .list(&filter, &pagination)
        .await?;

    Ok(Json(PaginatedResponse::new(
        vehicles,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get a vehicle
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Success"),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    let vehicle = state.vehicle_service().get(id).await?;
    Ok(Json(SuccessResponse::new(vehicle)))
}

/// Register a vehicle
#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehicleInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid input, unknown brand or owner"),
        (status = 403, description = "fleet-admin role required"),
        (status = 409, description = "VIN already registered")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiJson(input): ApiJson<CreateVehicleInput>,
) -> Result<impl IntoResponse> {
    let vehicle = state.vehicle_service().create(input, auth.actor()).await?;
    Ok((
        StatusCode::CREATED,
        location_header(format!("/api/v1/vehicles/{}", vehicle.id)),
        Json(SuccessResponse::new(vehicle)),
    ))
}

/// Update a vehicle
#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle id")),
    request_body = UpdateVehicleInput,
    responses(
        (status = 200, description = "Success"),
        (status = 400, description = "Invalid input, unknown brand or owner"),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
    ApiJson(input): ApiJson<UpdateVehicleInput>,
) -> Result<impl IntoResponse> {
    let vehicle = state
        .vehicle_service()
        .update(id, input, auth.actor())
        .await?;
    Ok(Json(SuccessResponse::new(vehicle)))
}

/// Delete a vehicle
#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    state.vehicle_service().delete(id, auth.actor()).await?;
    Ok(Json(MessageResponse::new("Vehicle deleted successfully")))
}
