//! Country repository

use crate::domain::{Country, StringUuid};
use async_trait::async_trait;
use motorpool_common::database::is_unique_violation;
use motorpool_common::{AppError, Result};
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Country>>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Country>>;
    /// Match against either ISO code, case-insensitively
    async fn find_by_iso_code(&self, code: &str) -> Result<Option<Country>>;
    async fn exists_iso2(&self, code: &str, exclude_id: Option<StringUuid>) -> Result<bool>;
    async fn exists_iso3(&self, code: &str, exclude_id: Option<StringUuid>) -> Result<bool>;
    async fn create(&self, country: &Country) -> Result<()>;
    async fn update(&self, country: &Country) -> Result<()>;
    /// Returns false when nothing was deleted
    async fn delete(&self, id: StringUuid) -> Result<bool>;
}

pub struct CountryRepositoryImpl {
    pool: MySqlPool,
}

impl CountryRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_COUNTRY: &str = r#"
    SELECT id, iso2_code, iso3_code, name, created_by, created_at, modified_by, modified_at
    FROM countries
"#;

fn map_write_error(err: sqlx::Error, country: &Country) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(format!(
            "A country with ISO code '{}' or '{}' already exists",
            country.iso2_code, country.iso3_code
        ))
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl CountryRepository for CountryRepositoryImpl {
    async fn list(&self) -> Result<Vec<Country>> {
        let countries =
            sqlx::query_as::<_, Country>(&format!("{} ORDER BY name ASC", SELECT_COUNTRY))
                .fetch_all(&self.pool)
                .await?;
        Ok(countries)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Country>> {
        let country = sqlx::query_as::<_, Country>(&format!("{} WHERE id = ?", SELECT_COUNTRY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(country)
    }

    async fn find_by_iso_code(&self, code: &str) -> Result<Option<Country>> {
        let code = code.trim().to_ascii_uppercase();
        let country = sqlx::query_as::<_, Country>(&format!(
            "{} WHERE iso2_code = ? OR iso3_code = ? LIMIT 1",
            SELECT_COUNTRY
        ))
        .bind(&code)
        .bind(&code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(country)
    }

    async fn exists_iso2(&self, code: &str, exclude_id: Option<StringUuid>) -> Result<bool> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM countries WHERE iso2_code = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(code.trim().to_ascii_uppercase())
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0 > 0)
    }

    async fn exists_iso3(&self, code: &str, exclude_id: Option<StringUuid>) -> Result<bool> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM countries WHERE iso3_code = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(code.trim().to_ascii_uppercase())
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0 > 0)
    }

    async fn create(&self, country: &Country) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO countries (id, iso2_code, iso3_code, name, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(country.id)
        .bind(&country.iso2_code)
        .bind(&country.iso3_code)
        .bind(&country.name)
        .bind(&country.modification.created_by)
        .bind(country.modification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, country))?;
        Ok(())
    }

    async fn update(&self, country: &Country) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE countries
            SET iso2_code = ?, iso3_code = ?, name = ?, modified_by = ?, modified_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&country.iso2_code)
        .bind(&country.iso3_code)
        .bind(&country.name)
        .bind(&country.modification.modified_by)
        .bind(country.modification.modified_at)
        .bind(country.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, country))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Country {} not found", country.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
