use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::database::entities::{lines, protection_devices, protection_half_sets, substations};
use crate::errors::{CalculationError, CalculationResult};

/// Half-set as shown on the line selection page
#[derive(Debug, Clone, Serialize)]
pub struct HalfSetSummary {
    pub id: i32,
    pub substation: String,
    pub device_model: String,
    pub manufacturer: String,
}

#[derive(Clone)]
pub struct LineService {
    db: DatabaseConnection,
}

impl LineService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_lines(&self) -> CalculationResult<Vec<lines::Model>> {
        let lines = lines::Entity::find()
            .order_by_asc(lines::Column::DispatchName)
            .all(&self.db)
            .await?;
        Ok(lines)
    }

    pub async fn get_line(&self, line_id: i32) -> CalculationResult<lines::Model> {
        lines::Entity::find_by_id(line_id)
            .one(&self.db)
            .await?
            .ok_or(CalculationError::LineNotFound(line_id))
    }

    pub async fn find_by_dispatch_name(&self, dispatch_name: &str) -> CalculationResult<lines::Model> {
        lines::Entity::find()
            .filter(lines::Column::DispatchName.eq(dispatch_name))
            .one(&self.db)
            .await?
            .ok_or_else(|| CalculationError::LineNotFoundByName(dispatch_name.to_string()))
    }

    /// Half-sets of a line with their substation and device names
    pub async fn half_sets(&self, line_id: i32) -> CalculationResult<Vec<HalfSetSummary>> {
        let half_sets = protection_half_sets::Entity::find()
            .filter(protection_half_sets::Column::LineId.eq(line_id))
            .order_by_asc(protection_half_sets::Column::Id)
            .find_also_related(substations::Entity)
            .all(&self.db)
            .await?;

        let mut summaries = Vec::with_capacity(half_sets.len());
        for (half_set, substation) in half_sets {
            let device = protection_devices::Entity::find_by_id(half_set.protection_device_id)
                .one(&self.db)
                .await?;

            summaries.push(HalfSetSummary {
                id: half_set.id,
                substation: substation
                    .map(|s| s.dispatch_name)
                    .unwrap_or_default(),
                device_model: device
                    .as_ref()
                    .map(|d| d.device_model.clone())
                    .unwrap_or_default(),
                manufacturer: device.map(|d| d.manufacturer).unwrap_or_default(),
            });
        }

        Ok(summaries)
    }
}
