use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One terminal-side instance of a line's protection, unique per (line, substation)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "protection_half_sets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub line_id: i32,
    pub substation_id: i32,
    pub protection_device_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lines::Entity",
        from = "Column::LineId",
        to = "super::lines::Column::Id",
        on_delete = "Cascade"
    )]
    Lines,
    #[sea_orm(
        belongs_to = "super::substations::Entity",
        from = "Column::SubstationId",
        to = "super::substations::Column::Id",
        on_delete = "Cascade"
    )]
    Substations,
    #[sea_orm(
        belongs_to = "super::protection_devices::Entity",
        from = "Column::ProtectionDeviceId",
        to = "super::protection_devices::Column::Id",
        on_delete = "Cascade"
    )]
    ProtectionDevices,
    #[sea_orm(has_many = "super::fault_calculations::Entity")]
    FaultCalculations,
    #[sea_orm(has_many = "super::settings_calculations::Entity")]
    SettingsCalculations,
}

impl Related<super::lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl Related<super::substations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Substations.def()
    }
}

impl Related<super::protection_devices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionDevices.def()
    }
}

impl Related<super::fault_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FaultCalculations.def()
    }
}

impl Related<super::settings_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SettingsCalculations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
