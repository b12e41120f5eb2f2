use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "substations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub dispatch_name: String,
    pub pf_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::protection_half_sets::Entity")]
    ProtectionHalfSets,
}

impl Related<super::protection_half_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionHalfSets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
