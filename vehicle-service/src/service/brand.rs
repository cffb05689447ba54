//! Vehicle brand business logic

use crate::directory::CountryDirectory;
use crate::domain::{
    ChangeKind, CreateBrandInput, EntityKind, FleetEvent, StringUuid, UpdateBrandInput,
    VehicleBrand,
};
use crate::repository::{BrandRepository, VehicleRepository};
use crate::SERVICE_NAME;
use motorpool_common::api::PaginationQuery;
use motorpool_common::events::{publish_all, EventBus};
use motorpool_common::{AppError, Result};
use std::sync::Arc;
use validator::Validate;

pub struct BrandService<R: BrandRepository, VR: VehicleRepository, D: CountryDirectory> {
    repo: Arc<R>,
    vehicle_repo: Arc<VR>,
    countries: Arc<D>,
    events: Arc<dyn EventBus>,
}

impl<R: BrandRepository, VR: VehicleRepository, D: CountryDirectory> BrandService<R, VR, D> {
    pub fn new(
        repo: Arc<R>,
        vehicle_repo: Arc<VR>,
        countries: Arc<D>,
        events: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            repo,
            vehicle_repo,
            countries,
            events,
        }
    }

    pub async fn create(&self, input: CreateBrandInput, actor: &str) -> Result<VehicleBrand> {
        input.validate()?;

        let brand = VehicleBrand::new(&input, actor);
        self.ensure_name_available(&brand.name, None).await?;
        self.ensure_country_exists(&brand.country_code).await?;

        self.repo.create(&brand).await?;
        self.publish(ChangeKind::Created, brand.id, actor).await;
        Ok(brand)
    }

    pub async fn get(&self, id: StringUuid) -> Result<VehicleBrand> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Brand {} not found", id)))
    }

    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<VehicleBrand>, i64)> {
        let brands = self
            .repo
            .list(pagination.offset(), pagination.per_page)
            .await?;
        let total = self.repo.count().await?;
        Ok((brands, total))
    }

    pub async fn update(
        &self,
        id: StringUuid,
        input: UpdateBrandInput,
        actor: &str,
    ) -> Result<VehicleBrand> {
        input.validate()?;

        let mut brand = self.get(id).await?;
        let previous_country = brand.country_code.clone();
        brand.apply(&input, actor);

        if input.name.is_some() {
            self.ensure_name_available(&brand.name, Some(id)).await?;
        }
        if brand.country_code != previous_country {
            self.ensure_country_exists(&brand.country_code).await?;
        }

        self.repo.update(&brand).await?;
        self.publish(ChangeKind::Modified, brand.id, actor).await;
        Ok(brand)
    }

    pub async fn delete(&self, id: StringUuid, actor: &str) -> Result<()> {
        let brand = self.get(id).await?;

        let in_use = self.vehicle_repo.count_by_brand(id).await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Brand '{}' is still used by {} vehicle(s)",
                brand.name, in_use
            )));
        }

        self.repo.delete(id).await?;
        self.publish(ChangeKind::Deleted, id, actor).await;
        Ok(())
    }

    async fn ensure_name_available(&self, name: &str, exclude: Option<StringUuid>) -> Result<()> {
        match self.repo.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != exclude => Err(AppError::Conflict(format!(
                "Brand with name '{}' already exists",
                name
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_country_exists(&self, code: &str) -> Result<()> {
        if self.countries.country_exists(code).await? {
            Ok(())
        } else {
            Err(AppError::invalid(
                "country_code",
                "unknown_country",
                format!("Country '{}' is not configured", code),
            ))
        }
    }

    async fn publish(&self, change: ChangeKind, id: StringUuid, actor: &str) {
        let event = FleetEvent::new(EntityKind::Brand, change, id, actor);
        publish_all(self.events.as_ref(), SERVICE_NAME, vec![event]).await;
    }
}
