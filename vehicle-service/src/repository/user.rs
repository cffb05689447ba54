//! Application user repository

use crate::domain::{ApplicationUser, StringUuid};
use async_trait::async_trait;
use motorpool_common::{AppError, Result};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<ApplicationUser>>;
    async fn find_by_subject(&self, subject: &str) -> Result<Option<ApplicationUser>>;
    /// Insert the user, or refresh email, name and `last_seen_at` when the
    /// subject is already known. Returns the stored row.
    async fn upsert(&self, user: &ApplicationUser) -> Result<ApplicationUser>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_USER: &str = r#"
    SELECT id, subject, email, display_name, created_at, last_seen_at
    FROM application_users
"#;

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<ApplicationUser>> {
        let user = sqlx::query_as::<_, ApplicationUser>(&format!("{} WHERE id = ?", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<ApplicationUser>> {
        let user =
            sqlx::query_as::<_, ApplicationUser>(&format!("{} WHERE subject = ?", SELECT_USER))
                .bind(subject)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn upsert(&self, user: &ApplicationUser) -> Result<ApplicationUser> {
        sqlx::query(
            r#"
            INSERT INTO application_users (id, subject, email, display_name, created_at, last_seen_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                email = VALUES(email),
                display_name = VALUES(display_name),
                last_seen_at = VALUES(last_seen_at)
            "#,
        )
        .bind(user.id)
        .bind(&user.subject)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.created_at)
        .bind(user.last_seen_at)
        .execute(&self.pool)
        .await?;

        self.find_by_subject(&user.subject)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to upsert user")))
    }
}
