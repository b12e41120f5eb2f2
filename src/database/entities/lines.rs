use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::LineParameters;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub dispatch_name: String,
    pub pf_name: Option<String>,
    pub current_capacity: f64,
    pub length: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::protection_half_sets::Entity")]
    ProtectionHalfSets,
    #[sea_orm(has_many = "super::calculation_metas::Entity")]
    CalculationMetas,
}

impl Related<super::protection_half_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionHalfSets.def()
    }
}

impl Related<super::calculation_metas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CalculationMetas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn parameters(&self) -> LineParameters {
        LineParameters {
            dispatch_name: self.dispatch_name.clone(),
            current_capacity: self.current_capacity,
            length: self.length,
        }
    }
}
