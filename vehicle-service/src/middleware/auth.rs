//! JWT authentication extractors
//!
//! `AuthUser` is required by every `/api/v1` handler. Handlers that change
//! fleet data take `FleetAdmin` instead, which additionally requires the
//! `fleet-admin` role.

use crate::jwt::AccessClaims;
use crate::state::HasServices;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use motorpool_common::{AppError, Result};
use serde::{Deserialize, Serialize};

pub const FLEET_ADMIN_ROLE: &str = "fleet-admin";

/// Authenticated caller, built from verified token claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Identity provider subject (`sub`)
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn from_claims(claims: &AccessClaims) -> Self {
        Self {
            subject: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.display_name(),
            roles: claims.all_roles(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_role(&self, role: &str) -> Result<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("Role '{}' is required", role)))
        }
    }

    /// Name recorded in audit columns and events
    pub fn actor(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.subject)
    }
}

/// Extract the Bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Unauthorized(
            "Authorization header must use Bearer scheme".to_string(),
        )),
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = state.token_verifier().verify(token)?;
        Ok(AuthUser::from_claims(&claims))
    }
}

/// Authenticated caller holding the `fleet-admin` role
#[derive(Debug, Clone)]
pub struct FleetAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for FleetAdmin
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require_role(FLEET_ADMIN_ROLE)?;
        Ok(FleetAdmin(user))
    }
}
