use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One settings calculation run
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calculation_metas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub calculation_number: i32,
    pub line_id: i32,
    pub created_at: ChronoDateTimeUtc,
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
    #[sea_orm(has_many = "super::settings_calculations::Entity")]
    SettingsCalculations,
}

impl Related<super::lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl Related<super::settings_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SettingsCalculations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
