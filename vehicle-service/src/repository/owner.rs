//! Vehicle owner repository

use super::map_write_error;
use crate::domain::{StringUuid, VehicleOwner};
use async_trait::async_trait;
use motorpool_common::{AppError, Result};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn create(&self, owner: &VehicleOwner) -> Result<()>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<VehicleOwner>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<VehicleOwner>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleOwner>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, owner: &VehicleOwner) -> Result<()>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct OwnerRepositoryImpl {
    pool: MySqlPool,
}

impl OwnerRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_OWNER: &str = r#"
    SELECT id, first_name, last_name, email, phone,
           created_by, created_at, modified_by, modified_at
    FROM vehicle_owners
"#;

#[async_trait]
impl OwnerRepository for OwnerRepositoryImpl {
    async fn create(&self, owner: &VehicleOwner) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_owners (id, first_name, last_name, email, phone, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner.id)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.email)
        .bind(&owner.phone)
        .bind(&owner.modification.created_by)
        .bind(owner.modification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || format!("Owner with email '{}' already exists", owner.email))
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<VehicleOwner>> {
        let owner = sqlx::query_as::<_, VehicleOwner>(&format!("{} WHERE id = ?", SELECT_OWNER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<VehicleOwner>> {
        let owner =
            sqlx::query_as::<_, VehicleOwner>(&format!("{} WHERE email = ?", SELECT_OWNER))
                .bind(email.trim().to_lowercase())
                .fetch_optional(&self.pool)
                .await?;
        Ok(owner)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleOwner>> {
        let owners = sqlx::query_as::<_, VehicleOwner>(&format!(
            "{} ORDER BY last_name ASC, first_name ASC LIMIT ? OFFSET ?",
            SELECT_OWNER
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(owners)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle_owners")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, owner: &VehicleOwner) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicle_owners
            SET first_name = ?, last_name = ?, email = ?, phone = ?, modified_by = ?, modified_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.email)
        .bind(&owner.phone)
        .bind(&owner.modification.modified_by)
        .bind(owner.modification.modified_at)
        .bind(owner.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || format!("Owner with email '{}' already exists", owner.email))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Owner {} not found", owner.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicle_owners WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Owner {} not found", id)));
        }
        Ok(())
    }
}
