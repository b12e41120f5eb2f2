use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensitivity_analyses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub settings_calculation_id: i32,
    pub fault_calculation_id: i32,
    pub sensitivity_rate: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::settings_calculations::Entity",
        from = "Column::SettingsCalculationId",
        to = "super::settings_calculations::Column::Id",
        on_delete = "Cascade"
    )]
    SettingsCalculations,
    #[sea_orm(
        belongs_to = "super::fault_calculations::Entity",
        from = "Column::FaultCalculationId",
        to = "super::fault_calculations::Column::Id",
        on_delete = "Cascade"
    )]
    FaultCalculations,
}

impl Related<super::settings_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SettingsCalculations.def()
    }
}

impl Related<super::fault_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FaultCalculations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
