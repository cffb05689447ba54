//! Vehicle brand repository

use super::map_write_error;
use crate::domain::{StringUuid, VehicleBrand};
use async_trait::async_trait;
use motorpool_common::{AppError, Result};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, brand: &VehicleBrand) -> Result<()>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<VehicleBrand>>;
    /// Case-insensitive
    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleBrand>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleBrand>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, brand: &VehicleBrand) -> Result<()>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct BrandRepositoryImpl {
    pool: MySqlPool,
}

impl BrandRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_BRAND: &str = r#"
    SELECT id, name, country_code, created_by, created_at, modified_by, modified_at
    FROM vehicle_brands
"#;

#[async_trait]
impl BrandRepository for BrandRepositoryImpl {
    async fn create(&self, brand: &VehicleBrand) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_brands (id, name, country_code, created_by, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(brand.id)
        .bind(&brand.name)
        .bind(&brand.country_code)
        .bind(&brand.modification.created_by)
        .bind(brand.modification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || format!("Brand '{}' already exists", brand.name)))?;
        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<VehicleBrand>> {
        let brand = sqlx::query_as::<_, VehicleBrand>(&format!("{} WHERE id = ?", SELECT_BRAND))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(brand)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<VehicleBrand>> {
        let brand = sqlx::query_as::<_, VehicleBrand>(&format!(
            "{} WHERE LOWER(name) = LOWER(?)",
            SELECT_BRAND
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(brand)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<VehicleBrand>> {
        let brands = sqlx::query_as::<_, VehicleBrand>(&format!(
            "{} ORDER BY name ASC LIMIT ? OFFSET ?",
            SELECT_BRAND
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(brands)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle_brands")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, brand: &VehicleBrand) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicle_brands
            SET name = ?, country_code = ?, modified_by = ?, modified_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&brand.name)
        .bind(&brand.country_code)
        .bind(&brand.modification.modified_by)
        .bind(brand.modification.modified_at)
        .bind(brand.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || format!("Brand '{}' already exists", brand.name)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Brand {} not found", brand.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicle_brands WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Brand {} not found", id)));
        }
        Ok(())
    }
}
