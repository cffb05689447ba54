//! Vehicle business logic

use crate::domain::{
    ChangeKind, CreateVehicleInput, EntityKind, FleetEvent, StringUuid, UpdateVehicleInput,
    Vehicle, VehicleFilter,
};
use crate::repository::{BrandRepository, OwnerRepository, VehicleRepository};
use crate::SERVICE_NAME;
use motorpool_common::api::PaginationQuery;
use motorpool_common::events::{publish_all, EventBus};
use motorpool_common::{AppError, Result, ValidationFailure};
use std::sync::Arc;
use validator::Validate;

pub struct VehicleService<R: VehicleRepository, BR: BrandRepository, OR: OwnerRepository> {
    repo: Arc<R>,
    brand_repo: Arc<BR>,
    owner_repo: Arc<OR>,
    events: Arc<dyn EventBus>,
}

impl<R: VehicleRepository, BR: BrandRepository, OR: OwnerRepository> VehicleService<R, BR, OR> {
    pub fn new(
        repo: Arc<R>,
        brand_repo: Arc<BR>,
        owner_repo: Arc<OR>,
        events: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            repo,
            brand_repo,
            owner_repo,
            events,
        }
    }

    pub async fn create(&self, input: CreateVehicleInput, actor: &str) -> Result<Vehicle> {
        input.validate()?;

        let vehicle = Vehicle::new(&input, actor);
        if self.repo.find_by_vin(&vehicle.vin).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Vehicle with VIN '{}' already exists",
                vehicle.vin
            )));
        }
        self.ensure_references(&vehicle).await?;

        self.repo.create(&vehicle).await?;
        self.publish(ChangeKind::Created, vehicle.id, actor).await;
        Ok(vehicle)
    }

    pub async fn get(&self, id: StringUuid) -> Result<Vehicle> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
    }

    pub async fn list(
        &self,
        filter: &VehicleFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Vehicle>, i64)> {
        let vehicles = self
            .repo
            .list(filter, pagination.offset(), pagination.per_page)
            .await?;
        let total = self.repo.count(filter).await?;
        Ok((vehicles, total))
    }

    /// Vehicles of one owner; 404 when the owner does not exist
    pub async fn list_for_owner(
        &self,
        owner_id: StringUuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<Vehicle>, i64)> {
        if self.owner_repo.find_by_id(owner_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Owner {} not found", owner_id)));
        }
        let filter = VehicleFilter {
            owner_id: Some(owner_id),
            ..Default::default()
        };
        self.list(&filter, pagination).await
    }

    pub async fn update(
        &self,
        id: StringUuid,
        input: UpdateVehicleInput,
        actor: &str,
    ) -> Result<Vehicle> {
        input.validate()?;

        let mut vehicle = self.get(id).await?;
        let (brand_before, owner_before) = (vehicle.brand_id, vehicle.owner_id);
        vehicle.apply(&input, actor);

        if vehicle.brand_id != brand_before || vehicle.owner_id != owner_before {
            self.ensure_references(&vehicle).await?;
        }

        self.repo.update(&vehicle).await?;
        self.publish(ChangeKind::Modified, vehicle.id, actor).await;
        Ok(vehicle)
    }

    pub async fn delete(&self, id: StringUuid, actor: &str) -> Result<()> {
        self.get(id).await?;
        self.repo.delete(id).await?;
        self.publish(ChangeKind::Deleted, id, actor).await;
        Ok(())
    }

    /// Brand and (optional) owner must exist
    async fn ensure_references(&self, vehicle: &Vehicle) -> Result<()> {
        let mut failures = Vec::new();

        if self.brand_repo.find_by_id(vehicle.brand_id).await?.is_none() {
            failures.push(ValidationFailure::new(
                "brand_id",
                "not_found",
                format!("Brand {} does not exist", vehicle.brand_id),
            ));
        }
        if let Some(owner_id) = vehicle.owner_id {
            if self.owner_repo.find_by_id(owner_id).await?.is_none() {
                failures.push(ValidationFailure::new(
                    "owner_id",
                    "not_found",
                    format!("Owner {} does not exist", owner_id),
                ));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(failures))
        }
    }

    async fn publish(&self, change: ChangeKind, id: StringUuid, actor: &str) {
        let event = FleetEvent::new(EntityKind::Vehicle, change, id, actor);
        publish_all(self.events.as_ref(), SERVICE_NAME, vec![event]).await;
    }
}
