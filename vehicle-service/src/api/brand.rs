//! Vehicle brand API handlers

use crate::api::location_header;
use crate::domain::{CreateBrandInput, StringUuid, UpdateBrandInput};
use crate::middleware::{AuthUser, FleetAdmin};
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use motorpool_common::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use motorpool_common::extract::{ApiJson, ApiPath, ApiQuery};
use motorpool_common::Result;

/// List brands
#[utoipa::path(
    get,
    path = "/api/v1/brands",
    tag = "Brands",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of brands ordered by name"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (brands, total) = state
        .brand_service()
        .list(&pagination)
        .await?;

    Ok(Json(PaginatedResponse::new(
        brands,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get a brand
#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    params(("id" = String, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Success"),
        (status = 404, description = "Unknown brand")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    let brand = state.brand_service().get(id).await?;
    Ok(Json(SuccessResponse::new(brand)))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "/api/v1/brands",
    tag = "Brands",
    request_body = CreateBrandInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid input or unknown country"),
        (status = 403, description = "fleet-admin role required"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiJson(input): ApiJson<CreateBrandInput>,
) -> Result<impl IntoResponse> {
    let brand = state.brand_service().create(input, auth.actor()).await?;
    Ok((
        StatusCode::CREATED,
        location_header(format!("/api/v1/brands/{}", brand.id)),
        Json(SuccessResponse::new(brand)),
    ))
}

/// Update a brand
#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    params(("id" = String, Path, description = "Brand id")),
    request_body = UpdateBrandInput,
    responses(
        (status = 200, description = "Success"),
        (status = 404, description = "Unknown brand"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
    ApiJson(input): ApiJson<UpdateBrandInput>,
) -> Result<impl IntoResponse> {
    let brand = state
        .brand_service()
        .update(id, input, auth.actor())
        .await?;
    Ok(Json(SuccessResponse::new(brand)))
}

/// Delete a brand
#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    params(("id" = String, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown brand"),
        (status = 409, description = "Brand still used by vehicles")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    FleetAdmin(auth): FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    state.brand_service().delete(id, auth.actor()).await?;
    Ok(Json(MessageResponse::new("Brand deleted successfully")))
}
