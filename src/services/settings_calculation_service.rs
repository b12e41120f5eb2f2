use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info, warn};

use crate::database::entities::{
    calculation_metas, components, fault_calculations, lines, protection_devices,
    protection_half_sets, settings_calculations,
};
use crate::errors::{CalculationError, CalculationResult};
use crate::settings::{round_to, CalculationContext, FaultRecord, SettingsFactors};

/// Outcome of one settings calculation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationSummary {
    pub stored: usize,
    /// Designations that have no formula
    pub skipped: Vec<String>,
}

/// Computes ДФЗ setting values for every half-set of a run's line
///
/// Rows are inserted one by one. A failing formula aborts the run and leaves
/// the rows stored before it in place.
#[derive(Clone)]
pub struct SettingsCalculationService {
    db: DatabaseConnection,
    factors: SettingsFactors,
}

impl SettingsCalculationService {
    pub fn new(db: DatabaseConnection, factors: SettingsFactors) -> Self {
        Self { db, factors }
    }

    pub async fn run(
        &self,
        calculation_meta: &calculation_metas::Model,
    ) -> CalculationResult<CalculationSummary> {
        let line = lines::Entity::find_by_id(calculation_meta.line_id)
            .one(&self.db)
            .await?
            .ok_or(CalculationError::LineNotFound(calculation_meta.line_id))?;
        info!("Calculating ДФЗ settings for {}", line.dispatch_name);

        let half_sets = line
            .find_related(protection_half_sets::Entity)
            .order_by_asc(protection_half_sets::Column::Id)
            .all(&self.db)
            .await?;

        let faults = self.load_fault_records(&half_sets).await?;
        let parameters = line.parameters();
        let ctx = CalculationContext {
            factors: &self.factors,
            line: &parameters,
            faults: &faults,
        };

        let mut summary = CalculationSummary::default();
        for half_set in &half_sets {
            info!("Calculating half-set {}", half_set.id);

            let device = protection_devices::Entity::find_by_id(half_set.protection_device_id)
                .one(&self.db)
                .await?;
            let Some(device) = device else {
                warn!("Half-set {} has no protection device", half_set.id);
                continue;
            };

            let components = device
                .find_related(components::Entity)
                .order_by_asc(components::Column::Id)
                .all(&self.db)
                .await?;

            for component in components {
                let Some(kind) = component.kind() else {
                    warn!(
                        "No calculation module for component {}",
                        component.setting_designation
                    );
                    summary.skipped.push(component.setting_designation.clone());
                    continue;
                };

                let setting = kind.evaluate(&ctx)?;
                let result_value = round_to(setting.value, 0);
                debug!(
                    "{}: {} (stored as {})",
                    component.setting_designation, setting.value, result_value
                );

                settings_calculations::ActiveModel {
                    calculation_meta_id: Set(calculation_meta.id),
                    protection_half_set_id: Set(half_set.id),
                    component_id: Set(component.id),
                    result_value: Set(result_value),
                    factors: Set(serde_json::to_value(&setting.inputs)?),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                summary.stored += 1;
            }
        }

        info!(
            "Settings calculation for {} finished: {} stored, {} skipped",
            line.dispatch_name,
            summary.stored,
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn load_fault_records(
        &self,
        half_sets: &[protection_half_sets::Model],
    ) -> CalculationResult<Vec<FaultRecord>> {
        let half_set_ids: Vec<i32> = half_sets.iter().map(|h| h.id).collect();
        let rows = fault_calculations::Entity::find()
            .filter(fault_calculations::Column::ProtectionHalfSetId.is_in(half_set_ids))
            .order_by_asc(fault_calculations::Column::Id)
            .all(&self.db)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match row.to_record() {
                Some(record) => records.push(record),
                None => warn!(
                    "Fault calculation {} has unknown fault type '{}'",
                    row.id, row.fault_type
                ),
            }
        }
        Ok(records)
    }
}
