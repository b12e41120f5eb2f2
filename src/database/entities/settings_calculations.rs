use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Setting value of one component of one half-set within a run
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings_calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub calculation_meta_id: i32,
    pub protection_half_set_id: i32,
    pub component_id: i32,
    pub result_value: f64,
    pub factors: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::calculation_metas::Entity",
        from = "Column::CalculationMetaId",
        to = "super::calculation_metas::Column::Id",
        on_delete = "Cascade"
    )]
    CalculationMetas,
    #[sea_orm(
        belongs_to = "super::protection_half_sets::Entity",
        from = "Column::ProtectionHalfSetId",
        to = "super::protection_half_sets::Column::Id",
        on_delete = "Cascade"
    )]
    ProtectionHalfSets,
    #[sea_orm(
        belongs_to = "super::components::Entity",
        from = "Column::ComponentId",
        to = "super::components::Column::Id",
        on_delete = "Cascade"
    )]
    Components,
    #[sea_orm(has_many = "super::sensitivity_analyses::Entity")]
    SensitivityAnalyses,
}

impl Related<super::calculation_metas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalculationMetas.def()
    }
}

impl Related<super::protection_half_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionHalfSets.def()
    }
}

impl Related<super::components::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Components.def()
    }
}

impl Related<super::sensitivity_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensitivityAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
