use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::ComponentKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "components")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub setting_designation: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device_components::Entity")]
    DeviceComponents,
    #[sea_orm(has_many = "super::settings_calculations::Entity")]
    SettingsCalculations,
}

impl Related<super::device_components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceComponents.def()
    }
}

impl Related<super::settings_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SettingsCalculations.def()
    }
}

impl Related<super::protection_devices::Entity> for Entity {
    fn to() -> RelationDef {
        super::device_components::Relation::ProtectionDevices.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::device_components::Relation::Components.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Formula kind for this component, if one exists
    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::from_designation(&self.setting_designation)
    }
}
