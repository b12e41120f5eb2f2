use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::settings::{FaultRecord, FaultType};

/// Stored short-circuit currents and voltages seen by one half-set
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fault_calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub protection_half_set_id: i32,
    pub fault_type: String,
    pub fault_location: String,
    pub network_topology: String,
    pub fault_values: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::protection_half_sets::Entity",
        from = "Column::ProtectionHalfSetId",
        to = "super::protection_half_sets::Column::Id",
        on_delete = "Cascade"
    )]
    ProtectionHalfSets,
    #[sea_orm(has_many = "super::sensitivity_analyses::Entity")]
    SensitivityAnalyses,
}

impl Related<super::protection_half_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtectionHalfSets.def()
    }
}

impl Related<super::sensitivity_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensitivityAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn get_fault_type(&self) -> Option<FaultType> {
        FaultType::from_code(&self.fault_type)
    }

    /// Formula input view; rows with an unknown fault type code yield `None`
    pub fn to_record(&self) -> Option<FaultRecord> {
        self.get_fault_type().map(|fault_type| FaultRecord {
            id: self.id,
            fault_type,
            values: self.fault_values.clone(),
        })
    }
}
