//! Vehicle owner API handlers

use crate::api::location_header;
use crate::domain::{CreateOwnerInput, StringUuid, UpdateOwnerInput};
use crate::middleware::{AuthUser, FleetAdmin};
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use motorpool_common::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use motorpool_common::extract::{ApiJson, ApiPath, ApiQuery};
use motorpool_common::Result;

/// List owners
#[utoipa::path(
    get,
    path = "/api/v1/owners",
    tag = "Owners",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of owners ordered by name"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (owners, total) = state
        .owner_service()
        .list(&pagination)
        .await?;

    Ok(Json(PaginatedResponse::new(
        owners,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get an owner
#[utoipa::path(
    get,
    path = "/api/v1/owners/{id}",
    tag = "Owners",
    params(("id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Success"),
        (status = 404, description = "Unknown owner")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    let owner = state.owner_service().get(id).await?;
    Ok(Json(SuccessResponse::new(owner)))
}

/// List the vehicles of an owner
#[utoipa::path(
    get,
    path = "/api/v1/owners/{id}/vehicles",
    tag = "Owners",
    params(("id" = String, Path, description = "Owner id"), PaginationQuery),
    responses(
        (status = 200, description = "Page of vehicles"),
        (status = 404, description = "Unknown owner")
    )
)]
pub async fn list_vehicles<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<StringUuid>,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (vehicles, total) = state
        .vehicle_service()
        .list_for_owner(id, &pagination)
        .await?;

    Ok(Json(PaginatedResponse::new(
        vehicles,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Create an owner
#[utoipa::path(
    post,
    path = "/api/v1/owners",
    tag = "Owners",
    request_body = CreateOwnerInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "fleet-admin role required"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiJson(input): ApiJson<CreateOwnerInput>,
) -> Result<impl IntoResponse> {
    let owner = state.owner_service().create(input, auth.actor()).await?;
    Ok((
        StatusCode::CREATED,
        location_header(format!("/api/v1/owners/{}", owner.id)),
        Json(SuccessResponse::new(owner)),
    ))
}

/// Update an owner
#[utoipa::path(
    put,
    path = "/api/v1/owners/{id}",
    tag = "Owners",
    params(("id" = String, Path, description = "Owner id")),
    request_body = UpdateOwnerInput,
    responses(
        (status = 200, description = "Success"),
        (status = 404, description = "Unknown owner"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
    ApiJson(input): ApiJson<UpdateOwnerInput>,
) -> Result<impl IntoResponse> {
    let owner = state
        .owner_service()
        .update(id, input, auth.actor())
        .await?;
    Ok(Json(SuccessResponse::new(owner)))
}

/// Delete an owner
#[utoipa::path(
    delete,
    path = "/api/v1/owners/{id}",
    tag = "Owners",
    params(("id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown owner"),
        (status = 409, description = "Owner still has vehicles")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    state.owner_service().delete(id, auth.actor()).await?;
    Ok(Json(MessageResponse::new("Owner deleted successfully")))
}
