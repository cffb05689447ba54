//! Notifications raised when fleet data changes

use super::StringUuid;
use motorpool_common::events::DomainEvent;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Brand,
    Owner,
    Vehicle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetEvent {
    pub entity: EntityKind,
    pub change: ChangeKind,
    pub id: StringUuid,
    pub actor: String,
}

impl FleetEvent {
    pub fn new(entity: EntityKind, change: ChangeKind, id: StringUuid, actor: &str) -> Self {
        Self {
            entity,
            change,
            id,
            actor: actor.to_string(),
        }
    }
}

impl DomainEvent for FleetEvent {
    fn event_type(&self) -> &'static str {
        use ChangeKind::*;
        use EntityKind::*;
        match (self.entity, self.change) {
            (Brand, Created) => "vehicle_brand.created",
            (Brand, Modified) => "vehicle_brand.modified",
            (Brand, Deleted) => "vehicle_brand.deleted",
            (Owner, Created) => "vehicle_owner.created",
            (Owner, Modified) => "vehicle_owner.modified",
            (Owner, Deleted) => "vehicle_owner.deleted",
            (Vehicle, Created) => "vehicle.created",
            (Vehicle, Modified) => "vehicle.modified",
            (Vehicle, Deleted) => "vehicle.deleted",
        }
    }

    fn aggregate_id(&self) -> String {
        self.id.to_string()
    }
}
