//! Application users provisioned from access tokens

use crate::domain::{ApplicationUser, StringUuid};
use crate::middleware::AuthUser;
use crate::repository::UserRepository;
use motorpool_common::{AppError, Result};
use std::sync::Arc;

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create the record for the caller on first sight, otherwise refresh
    /// its profile fields and `last_seen_at`
    pub async fn touch(&self, user: &AuthUser) -> Result<ApplicationUser> {
        let record = ApplicationUser::new(&user.subject, user.email.clone(), user.name.clone());
        let stored = self.repo.upsert(&record).await?;
        if stored.id != record.id {
            tracing::debug!(subject = %stored.subject, "Refreshed application user");
        } else {
            tracing::info!(subject = %stored.subject, "Provisioned application user");
        }
        Ok(stored)
    }

    pub async fn get(&self, id: StringUuid) -> Result<ApplicationUser> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
