use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Component implemented by a protection device
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device_components")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub protection_device_id: i32,
    pub component_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::protection_devices::Entity",
        from = "Column::ProtectionDeviceId",
        to = "super::protection_devices::Column::Id",
        on_delete = "Cascade"
    )]
    ProtectionDevices,
    #[sea_orm(
        belongs_to = "super::components::Entity",
        from = "Column::ComponentId",
        to = "super::components::Column::Id",
        on_delete = "Cascade"
    )]
    Components,
}

impl Related<super::protection_devices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionDevices.def()
    }
}

impl Related<super::components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Components.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
