//! Audit fields carried by every persisted entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Who created / last modified a row, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ModificationInfo {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl ModificationInfo {
    pub fn created(actor: &str) -> Self {
        Self {
            created_by: actor.to_string(),
            created_at: Utc::now(),
            modified_by: None,
            modified_at: None,
        }
    }

    pub fn touch(&mut self, actor: &str) {
        self.modified_by = Some(actor.to_string());
        self.modified_at = Some(Utc::now());
    }

    /// Timestamp of the latest change
    pub fn last_changed_at(&self) -> DateTime<Utc> {
        self.modified_at.unwrap_or(self.created_at)
    }
}

impl Default for ModificationInfo {
    fn default() -> Self {
        Self::created(crate::extract::ANONYMOUS)
    }
}
