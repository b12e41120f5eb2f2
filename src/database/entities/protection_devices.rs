use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "protection_devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub device_model: String,
    pub manufacturer: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device_components::Entity")]
    DeviceComponents,
    #[sea_orm(has_many = "super::protection_half_sets::Entity")]
    ProtectionHalfSets,
}

impl Related<super::device_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceComponents.def()
    }
}

impl Related<super::protection_half_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionHalfSets.def()
    }
}

impl Related<super::components::Entity> for Entity {
    fn to() -> RelationDef {
        super::device_components::Relation::Components.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::device_components::Relation::ProtectionDevices.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
