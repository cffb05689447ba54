//! Users known from the external identity provider

use super::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Local record of a token subject, refreshed on every `/users/me` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ApplicationUser {
    pub id: StringUuid,
    /// `sub` claim of the access token
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl ApplicationUser {
    pub fn new(subject: &str, email: Option<String>, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            subject: subject.to_string(),
            email,
            display_name,
            created_at: now,
            last_seen_at: now,
        }
    }
}
