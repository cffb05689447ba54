//! Vehicle repository

use super::map_write_error;
use crate::domain::{StringUuid, Vehicle, VehicleFilter};
use async_trait::async_trait;
use motorpool_common::{AppError, Result};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> Result<()>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Vehicle>>;
    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>>;
    async fn list(&self, filter: &VehicleFilter, offset: i64, limit: i64) -> Result<Vec<Vehicle>>;
    async fn count(&self, filter: &VehicleFilter) -> Result<i64>;
    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64>;
    async fn count_by_owner(&self, owner_id: StringUuid) -> Result<i64>;
    async fn update(&self, vehicle: &Vehicle) -> Result<()>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct VehicleRepositoryImpl {
    pool: MySqlPool,
}

impl VehicleRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_VEHICLE: &str = r#"
    SELECT id, vin, license_plate, model, model_year, color, brand_id, owner_id,
           created_by, created_at, modified_by, modified_at
    FROM vehicles
"#;

const FILTER_CLAUSE: &str = "WHERE (? IS NULL OR brand_id = ?) AND (? IS NULL OR owner_id = ?)";

fn duplicate_vin(vehicle: &Vehicle) -> String {
    format!("Vehicle with VIN '{}' already exists", vehicle.vin)
}

#[async_trait]
impl VehicleRepository for VehicleRepositoryImpl {
    async fn create(&self, vehicle: &Vehicle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, vin, license_plate, model, model_year, color, brand_id, owner_id,
                                  created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.vin)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.model)
        .bind(vehicle.model_year)
        .bind(&vehicle.color)
        .bind(vehicle.brand_id)
        .bind(vehicle.owner_id)
        .bind(&vehicle.modification.created_by)
        .bind(vehicle.modification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || duplicate_vin(vehicle)))?;
        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!("{} WHERE id = ?", SELECT_VEHICLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!("{} WHERE vin = ?", SELECT_VEHICLE))
            .bind(vin.trim().to_ascii_uppercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    async fn list(&self, filter: &VehicleFilter, offset: i64, limit: i64) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "{} {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            SELECT_VEHICLE, FILTER_CLAUSE
        ))
        .bind(filter.brand_id)
        .bind(filter.brand_id)
        .bind(filter.owner_id)
        .bind(filter.owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    async fn count(&self, filter: &VehicleFilter) -> Result<i64> {
        let row: (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM vehicles {}", FILTER_CLAUSE))
                .bind(filter.brand_id)
                .bind(filter.brand_id)
                .bind(filter.owner_id)
                .bind(filter.owner_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    async fn count_by_brand(&self, brand_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE brand_id = ?")
            .bind(brand_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn count_by_owner(&self, owner_id: StringUuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET license_plate = ?, model = ?, model_year = ?, color = ?, brand_id = ?, owner_id = ?,
                modified_by = ?, modified_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.license_plate)
        .bind(&vehicle.model)
        .bind(vehicle.model_year)
        .bind(&vehicle.color)
        .bind(vehicle.brand_id)
        .bind(vehicle.owner_id)
        .bind(&vehicle.modification.modified_by)
        .bind(vehicle.modification.modified_at)
        .bind(vehicle.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || duplicate_vin(vehicle)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle {} not found", vehicle.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle {} not found", id)));
        }
        Ok(())
    }
}
