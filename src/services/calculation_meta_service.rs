use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::database::entities::{
    calculation_metas, components, fault_calculations, lines, protection_half_sets,
    sensitivity_analyses, settings_calculations, substations,
};
use crate::errors::{CalculationError, CalculationResult};
use crate::settings::ComponentKind;

#[derive(Debug, Clone, Serialize)]
pub struct CalculationListItem {
    pub id: i32,
    pub calculation_number: i32,
    pub line_id: i32,
    pub line_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResultRow {
    pub id: i32,
    pub protection_half_set_id: i32,
    pub substation: String,
    pub designation: String,
    pub description: Option<String>,
    pub result_value: f64,
    pub factors: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct SensitivityResultRow {
    pub id: i32,
    pub settings_calculation_id: i32,
    pub fault_calculation_id: i32,
    pub substation: String,
    pub designation: String,
    pub setting_value: f64,
    pub fault_type: String,
    /// Russian name of the fault type, empty for unknown codes
    pub fault_type_label: String,
    pub fault_location: String,
    pub network_topology: String,
    pub fault_value: Option<f64>,
    pub sensitivity_rate: f64,
}

/// Creation and lookup of calculation runs and their stored protocols
#[derive(Clone)]
pub struct CalculationMetaService {
    db: DatabaseConnection,
}

impl CalculationMetaService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Next free calculation number (max + 1, starting at 1)
    pub async fn next_calculation_number(&self) -> CalculationResult<i32> {
        let max_number = calculation_metas::Entity::find()
            .select_only()
            .column_as(
                Expr::col(calculation_metas::Column::CalculationNumber).max(),
                "max_number",
            )
            .into_tuple::<Option<i32>>()
            .one(&self.db)
            .await?;

        Ok(max_number.flatten().unwrap_or(0) + 1)
    }

    /// Opens a new run for a line
    ///
    /// The number is computed and written by one `INSERT ... SELECT`, so the
    /// database write lock covers both the read of the current maximum and
    /// the insert. The unique index on `calculation_number` backs this up.
    pub async fn create_for_line(&self, line_id: i32) -> CalculationResult<calculation_metas::Model> {
        let line = lines::Entity::find_by_id(line_id)
            .one(&self.db)
            .await?
            .ok_or(CalculationError::LineNotFound(line_id))?;

        let next_number = Query::select()
            .expr(
                Expr::expr(Func::coalesce([
                    Expr::col(calculation_metas::Column::CalculationNumber).max(),
                    Expr::val(0).into(),
                ]))
                .add(1),
            )
            .expr(Expr::val(line.id))
            .expr(Expr::val(Utc::now()))
            .from(calculation_metas::Entity)
            .to_owned();

        let insert = Query::insert()
            .into_table(calculation_metas::Entity)
            .columns([
                calculation_metas::Column::CalculationNumber,
                calculation_metas::Column::LineId,
                calculation_metas::Column::CreatedAt,
            ])
            .select_from(next_number)
            .map_err(|e| DbErr::Custom(e.to_string()))?
            .to_owned();

        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&insert)).await?;
        let meta_id = result.last_insert_id() as i32;

        let meta = calculation_metas::Entity::find_by_id(meta_id)
            .one(&self.db)
            .await?
            .ok_or(CalculationError::CalculationNotFound(meta_id))?;

        info!(
            "Created calculation #{} for line {}",
            meta.calculation_number, line.dispatch_name
        );
        Ok(meta)
    }

    pub async fn get_calculation(&self, calculation_id: i32) -> CalculationResult<calculation_metas::Model> {
        calculation_metas::Entity::find_by_id(calculation_id)
            .one(&self.db)
            .await?
            .ok_or(CalculationError::CalculationNotFound(calculation_id))
    }

    /// All runs, newest first
    pub async fn list_calculations(&self) -> CalculationResult<Vec<CalculationListItem>> {
        let metas = calculation_metas::Entity::find()
            .order_by_desc(calculation_metas::Column::CreatedAt)
            .order_by_desc(calculation_metas::Column::Id)
            .find_also_related(lines::Entity)
            .all(&self.db)
            .await?;

        Ok(metas
            .into_iter()
            .map(|(meta, line)| CalculationListItem {
                id: meta.id,
                calculation_number: meta.calculation_number,
                line_id: meta.line_id,
                line_name: line.map(|l| l.dispatch_name).unwrap_or_default(),
                created_at: meta.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            })
            .collect())
    }

    /// Settings protocol of a run in calculation order
    pub async fn settings_results(&self, calculation_id: i32) -> CalculationResult<Vec<SettingsResultRow>> {
        let settings = settings_calculations::Entity::find()
            .filter(settings_calculations::Column::CalculationMetaId.eq(calculation_id))
            .order_by_asc(settings_calculations::Column::Id)
            .find_also_related(components::Entity)
            .all(&self.db)
            .await?;

        let substation_names = self.substation_names_for_run(calculation_id).await?;

        Ok(settings
            .into_iter()
            .map(|(setting, component)| SettingsResultRow {
                id: setting.id,
                protection_half_set_id: setting.protection_half_set_id,
                substation: substation_names
                    .get(&setting.protection_half_set_id)
                    .cloned()
                    .unwrap_or_default(),
                designation: component
                    .as_ref()
                    .map(|c| c.setting_designation.clone())
                    .unwrap_or_default(),
                description: component.and_then(|c| c.description),
                result_value: setting.result_value,
                factors: setting.factors,
            })
            .collect())
    }

    /// Sensitivity protocol of a run, grouped by setting row
    pub async fn sensitivity_results(
        &self,
        calculation_id: i32,
    ) -> CalculationResult<Vec<SensitivityResultRow>> {
        let settings: HashMap<i32, SettingsResultRow> = self
            .settings_results(calculation_id)
            .await?
            .into_iter()
            .map(|row| (row.id, row))
            .collect();

        let analyses = sensitivity_analyses::Entity::find()
            .filter(
                sensitivity_analyses::Column::SettingsCalculationId
                    .is_in(settings.keys().copied().collect::<Vec<_>>()),
            )
            .order_by_asc(sensitivity_analyses::Column::SettingsCalculationId)
            .order_by_asc(sensitivity_analyses::Column::Id)
            .find_also_related(fault_calculations::Entity)
            .all(&self.db)
            .await?;

        let mut rows = Vec::with_capacity(analyses.len());
        for (analysis, fault) in analyses {
            let Some(setting) = settings.get(&analysis.settings_calculation_id) else {
                continue;
            };
            let Some(fault) = fault else {
                continue;
            };

            let fault_value = ComponentKind::from_designation(&setting.designation)
                .and_then(|kind| kind.sensitivity_handler())
                .and_then(|handler| fault.fault_values.get(handler.fault_value_key))
                .and_then(Value::as_f64);

            rows.push(SensitivityResultRow {
                id: analysis.id,
                settings_calculation_id: analysis.settings_calculation_id,
                fault_calculation_id: fault.id,
                substation: setting.substation.clone(),
                designation: setting.designation.clone(),
                setting_value: setting.result_value,
                fault_type_label: fault
                    .get_fault_type()
                    .map(|fault_type| fault_type.label().to_string())
                    .unwrap_or_default(),
                fault_type: fault.fault_type,
                fault_location: fault.fault_location,
                network_topology: fault.network_topology,
                fault_value,
                sensitivity_rate: analysis.sensitivity_rate,
            });
        }

        Ok(rows)
    }

    async fn substation_names_for_run(&self, calculation_id: i32) -> CalculationResult<HashMap<i32, String>> {
        let meta = self.get_calculation(calculation_id).await?;
        let half_sets = protection_half_sets::Entity::find()
            .filter(protection_half_sets::Column::LineId.eq(meta.line_id))
            .find_also_related(substations::Entity)
            .all(&self.db)
            .await?;

        Ok(half_sets
            .into_iter()
            .map(|(half_set, substation)| {
                (
                    half_set.id,
                    substation.map(|s| s.dispatch_name).unwrap_or_default(),
                )
            })
            .collect())
    }
}
