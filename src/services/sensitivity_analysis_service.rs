use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info, warn};

use crate::database::entities::{
    calculation_metas, components, fault_calculations, sensitivity_analyses,
    settings_calculations,
};
use crate::errors::{CalculationError, CalculationResult};
use crate::settings::{fault_type::join_codes, round_to};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensitivitySummary {
    pub stored: usize,
    /// Setting rows whose component has no sensitivity check
    pub skipped: usize,
}

/// Cross-references a run's trip settings with stored fault calculations
#[derive(Clone)]
pub struct SensitivityAnalysisService {
    db: DatabaseConnection,
}

impl SensitivityAnalysisService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the sensitivity protocol of a run
    ///
    /// No transaction: a zero setting or a missing fault value aborts the
    /// batch and keeps the ratios stored so far.
    pub async fn run(
        &self,
        calculation_meta: &calculation_metas::Model,
    ) -> CalculationResult<SensitivitySummary> {
        info!(
            "Running sensitivity analysis for calculation #{}",
            calculation_meta.calculation_number
        );

        let settings = settings_calculations::Entity::find()
            .filter(settings_calculations::Column::CalculationMetaId.eq(calculation_meta.id))
            .order_by_asc(settings_calculations::Column::Id)
            .find_also_related(components::Entity)
            .all(&self.db)
            .await?;

        let setting_ids: Vec<i32> = settings.iter().map(|(setting, _)| setting.id).collect();
        let cleared = sensitivity_analyses::Entity::delete_many()
            .filter(sensitivity_analyses::Column::SettingsCalculationId.is_in(setting_ids))
            .exec(&self.db)
            .await?;
        if cleared.rows_affected > 0 {
            debug!("Removed {} previous sensitivity rows", cleared.rows_affected);
        }

        let mut summary = SensitivitySummary::default();
        for (setting, component) in settings {
            let Some(component) = component else {
                warn!("Settings calculation {} has no component", setting.id);
                summary.skipped += 1;
                continue;
            };
            let Some(handler) = component.kind().and_then(|kind| kind.sensitivity_handler()) else {
                debug!(
                    "No sensitivity check for component {}",
                    component.setting_designation
                );
                summary.skipped += 1;
                continue;
            };

            info!(
                "Component {}: fault types {}",
                component.setting_designation,
                join_codes(handler.fault_types)
            );

            for fault_type in handler.fault_types {
                let faults = fault_calculations::Entity::find()
                    .filter(
                        fault_calculations::Column::ProtectionHalfSetId
                            .eq(setting.protection_half_set_id),
                    )
                    .filter(fault_calculations::Column::FaultType.eq(fault_type.code()))
                    .order_by_asc(fault_calculations::Column::Id)
                    .all(&self.db)
                    .await?;
                debug!("{}: {} fault calculations", fault_type, faults.len());

                for fault in faults {
                    let Some(record) = fault.to_record() else {
                        continue;
                    };
                    let fault_value = record.value(handler.fault_value_key)?;
                    let ratio = handler
                        .ratio(fault_value, setting.result_value)
                        .ok_or(CalculationError::ZeroSetting(setting.id))?;
                    let sensitivity_rate = round_to(ratio, 2);
                    debug!("Sensitivity rate {:.2}", sensitivity_rate);

                    sensitivity_analyses::ActiveModel {
                        settings_calculation_id: Set(setting.id),
                        fault_calculation_id: Set(fault.id),
                        sensitivity_rate: Set(sensitivity_rate),
                        ..Default::default()
                    }
                    .insert(&self.db)
                    .await?;
                    summary.stored += 1;
                }
            }
        }

        info!(
            "Sensitivity analysis finished: {} ratios stored, {} settings skipped",
            summary.stored, summary.skipped
        );
        Ok(summary)
    }
}
