//! Application user API handlers

use crate::domain::StringUuid;
use crate::middleware::{AuthUser, FleetAdmin};
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};
use motorpool_common::api::SuccessResponse;
use motorpool_common::extract::ApiPath;
use motorpool_common::Result;

/// The calling user, provisioned on first call
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Success"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let user = state.user_service().touch(&auth).await?;
    Ok(Json(SuccessResponse::new(user)))
}

/// Look up a provisioned user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Success"),
        (status = 403, description = "fleet-admin role required"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _admin: FleetAdmin,
    ApiPath(id): ApiPath<StringUuid>,
) -> Result<impl IntoResponse> {
    let user = state.user_service().get(id).await?;
    Ok(Json(SuccessResponse::new(user)))
}
