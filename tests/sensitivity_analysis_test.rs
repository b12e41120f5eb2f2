//! Sensitivity analysis over a computed settings run

mod common;

use anyhow::Result;
use common::{line_by_name, setup_seeded_db, ZARYA_YURGA};
use dfz::database::entities::*;
use dfz::errors::CalculationError;
use dfz::services::{CalculationMetaService, SensitivityAnalysisService, SettingsCalculationService};
use dfz::settings::SettingsFactors;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

async fn calculated_run(db: &DatabaseConnection) -> Result<calculation_metas::Model> {
    let line = line_by_name(db, ZARYA_YURGA).await?;
    let meta = CalculationMetaService::new(db.clone())
        .create_for_line(line.id)
        .await?;
    SettingsCalculationService::new(db.clone(), SettingsFactors::default())
        .run(&meta)
        .await?;
    Ok(meta)
}

#[tokio::test]
async fn test_sensitivity_rows_per_trip_element() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let meta = calculated_run(&db).await?;

    let summary = SensitivityAnalysisService::new(db.clone()).run(&meta).await?;
    // per half-set: IЛ ОТКЛ 2, I2 ОТКЛ 6, DI2 ОТКЛ 6, U2 ОТКЛ 6, DI1 ОТКЛ 2
    assert_eq!(summary.stored, 2 * 22);
    assert_eq!(summary.skipped, 2 * 7);

    let rows = CalculationMetaService::new(db.clone())
        .sensitivity_results(meta.id)
        .await?;
    assert_eq!(rows.len(), 44);

    let il_trip: Vec<_> = rows
        .iter()
        .filter(|row| row.designation == "IЛ ОТКЛ")
        .collect();
    assert_eq!(il_trip.len(), 4);
    assert!(il_trip.iter().all(|row| row.fault_type == "К(3)"));
    assert!(il_trip.iter().all(|row| row.fault_type_label == "Трехфазное КЗ"));

    let i2_types: Vec<&str> = rows
        .iter()
        .filter(|row| row.designation == "I2 ОТКЛ")
        .map(|row| row.fault_type.as_str())
        .collect();
    assert!(i2_types.iter().all(|t| ["К(2)", "К(1,1)", "К(1)"].contains(t)));

    Ok(())
}

#[tokio::test]
async fn test_sensitivity_ratio_values() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let meta = calculated_run(&db).await?;
    SensitivityAnalysisService::new(db.clone()).run(&meta).await?;

    let rows = CalculationMetaService::new(db.clone())
        .sensitivity_results(meta.id)
        .await?;

    for row in &rows {
        let fault_value = row
            .fault_value
            .ok_or_else(|| anyhow::anyhow!("row {} has no fault value", row.id))?;
        let ratio = fault_value / row.setting_value;
        let expected = if row.designation == "IЛ ОТКЛ" {
            3f64.sqrt() * ratio
        } else {
            ratio
        };
        assert!(
            (row.sensitivity_rate - expected).abs() <= 0.005 + 1e-9,
            "{} {}: {} vs {}",
            row.designation,
            row.fault_type,
            row.sensitivity_rate,
            expected
        );
    }

    // Заря end, normal topology: sqrt(3) * 8600 / 7005
    let il_trip = rows
        .iter()
        .find(|row| row.designation == "IЛ ОТКЛ" && row.fault_value == Some(8600.0))
        .ok_or_else(|| anyhow::anyhow!("no IЛ ОТКЛ row for 8600 A"))?;
    assert_eq!(il_trip.sensitivity_rate, 2.13);

    let di1_trip = rows
        .iter()
        .find(|row| row.designation == "DI1 ОТКЛ" && row.fault_value == Some(8600.0))
        .ok_or_else(|| anyhow::anyhow!("no DI1 ОТКЛ row for 8600 A"))?;
    assert_eq!(di1_trip.sensitivity_rate, 2.95);

    Ok(())
}

#[tokio::test]
async fn test_rerun_replaces_previous_rows() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let meta = calculated_run(&db).await?;
    let service = SensitivityAnalysisService::new(db.clone());

    service.run(&meta).await?;
    service.run(&meta).await?;

    assert_eq!(sensitivity_analyses::Entity::find().count(&db).await?, 44);

    Ok(())
}

/// Sensitivity rows that precede `U2 ОТКЛ` of the first half-set:
/// IЛ ОТКЛ 2, I2 ОТКЛ 6, DI1 ОТКЛ 2, DI2 ОТКЛ 6
const ROWS_BEFORE_U2_TRIP: u64 = 16;

async fn stored_rows(db: &DatabaseConnection) -> Result<u64> {
    Ok(sensitivity_analyses::Entity::find().count(db).await?)
}

#[tokio::test]
async fn test_zero_setting_is_reported() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let meta = calculated_run(&db).await?;

    let u2_trip = components::Entity::find()
        .filter(components::Column::SettingDesignation.eq("U2 ОТКЛ"))
        .one(&db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no U2 ОТКЛ component"))?;
    let setting = settings_calculations::Entity::find()
        .filter(settings_calculations::Column::CalculationMetaId.eq(meta.id))
        .filter(settings_calculations::Column::ComponentId.eq(u2_trip.id))
        .order_by_asc(settings_calculations::Column::Id)
        .one(&db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no U2 ОТКЛ setting"))?;
    let setting_id = setting.id;
    let mut zeroed = setting.into_active_model();
    zeroed.result_value = Set(0.0);
    zeroed.update(&db).await?;

    let err = SensitivityAnalysisService::new(db.clone())
        .run(&meta)
        .await
        .unwrap_err();
    assert!(matches!(err, CalculationError::ZeroSetting(id) if id == setting_id));
    assert!(err.is_data_error());

    // ratios computed before the zero setting stay stored
    assert_eq!(stored_rows(&db).await?, ROWS_BEFORE_U2_TRIP);

    Ok(())
}

#[tokio::test]
async fn test_missing_fault_value_aborts_and_keeps_earlier_rows() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let meta = calculated_run(&db).await?;

    let first_setting = settings_calculations::Entity::find()
        .filter(settings_calculations::Column::CalculationMetaId.eq(meta.id))
        .order_by_asc(settings_calculations::Column::Id)
        .one(&db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no settings stored"))?;
    let phase_to_phase = fault_calculations::Entity::find()
        .filter(
            fault_calculations::Column::ProtectionHalfSetId.eq(first_setting.protection_half_set_id),
        )
        .filter(fault_calculations::Column::FaultType.eq("К(2)"))
        .order_by_asc(fault_calculations::Column::Id)
        .one(&db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no К(2) fault calculation"))?;
    let fault_id = phase_to_phase.id;

    let mut values = phase_to_phase.fault_values.clone();
    if let Some(map) = values.as_object_mut() {
        map.remove("U2");
    }
    let mut stripped = phase_to_phase.into_active_model();
    stripped.fault_values = Set(values);
    stripped.update(&db).await?;

    let err = SensitivityAnalysisService::new(db.clone())
        .run(&meta)
        .await
        .unwrap_err();
    match err {
        CalculationError::MissingFaultValue {
            ref key,
            fault_calculation_id,
        } => {
            assert_eq!(key, "U2");
            assert_eq!(fault_calculation_id, fault_id);
        }
        other => panic!("unexpected error {:?}", other),
    }

    assert_eq!(stored_rows(&db).await?, ROWS_BEFORE_U2_TRIP);

    Ok(())
}

#[tokio::test]
async fn test_run_without_settings_stores_nothing() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let line = line_by_name(&db, ZARYA_YURGA).await?;
    let meta = CalculationMetaService::new(db.clone())
        .create_for_line(line.id)
        .await?;

    let summary = SensitivityAnalysisService::new(db.clone()).run(&meta).await?;
    assert_eq!(summary.stored, 0);
    assert_eq!(summary.skipped, 0);

    Ok(())
}
