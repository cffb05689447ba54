//! Vehicle owner business logic

use crate::domain::{
    ChangeKind, CreateOwnerInput, EntityKind, FleetEvent, StringUuid, UpdateOwnerInput,
    VehicleOwner,
};
use crate::repository::{OwnerRepository, VehicleRepository};
use crate::SERVICE_NAME;
use motorpool_common::api::PaginationQuery;
use motorpool_common::events::{publish_all, EventBus};
use motorpool_common::{AppError, Result};
use std::sync::Arc;
use validator::Validate;

pub struct OwnerService<R: OwnerRepository, VR: VehicleRepository> {
    repo: Arc<R>,
    vehicle_repo: Arc<VR>,
    events: Arc<dyn EventBus>,
}

impl<R: OwnerRepository, VR: VehicleRepository> OwnerService<R, VR> {
    pub fn new(repo: Arc<R>, vehicle_repo: Arc<VR>, events: Arc<dyn EventBus>) -> Self {
        Self {
            repo,
            vehicle_repo,
            events,
        }
    }

    pub async fn create(&self, input: CreateOwnerInput, actor: &str) -> Result<VehicleOwner> {
        input.validate()?;

        let owner = VehicleOwner::new(&input, actor);
        self.ensure_email_available(&owner.email, None).await?;

        self.repo.create(&owner).await?;
        self.publish(ChangeKind::Created, owner.id, actor).await;
        Ok(owner)
    }

    pub async fn get(&self, id: StringUuid) -> Result<VehicleOwner> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Owner {} not found", id)))
    }

    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<VehicleOwner>, i64)> {
        let owners = self
            .repo
            .list(pagination.offset(), pagination.per_page)
            .await?;
        let total = self.repo.count().await?;
        Ok((owners, total))
    }

    pub async fn update(
        &self,
        id: StringUuid,
        input: UpdateOwnerInput,
        actor: &str,
    ) -> Result<VehicleOwner> {
        input.validate()?;

        let mut owner = self.get(id).await?;
        owner.apply(&input, actor);
        if input.email.is_some() {
            self.ensure_email_available(&owner.email, Some(id)).await?;
        }

        self.repo.update(&owner).await?;
        self.publish(ChangeKind::Modified, owner.id, actor).await;
        Ok(owner)
    }

    pub async fn delete(&self, id: StringUuid, actor: &str) -> Result<()> {
        let owner = self.get(id).await?;

        let in_use = self.vehicle_repo.count_by_owner(id).await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Owner '{}' still owns {} vehicle(s)",
                owner.full_name(),
                in_use
            )));
        }

        self.repo.delete(id).await?;
        self.publish(ChangeKind::Deleted, id, actor).await;
        Ok(())
    }

    async fn ensure_email_available(&self, email: &str, exclude: Option<StringUuid>) -> Result<()> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != exclude => Err(AppError::Conflict(format!(
                "Owner with email '{}' already exists",
                email
            ))),
            _ => Ok(()),
        }
    }

    async fn publish(&self, change: ChangeKind, id: StringUuid, actor: &str) {
        let event = FleetEvent::new(EntityKind::Owner, change, id, actor);
        publish_all(self.events.as_ref(), SERVICE_NAME, vec![event]).await;
    }
}
