//! Database tests
//!
//! Migrations, seed data and calculation run bookkeeping

mod common;

use anyhow::Result;
use chrono::Utc;
use common::{line_by_name, setup_seeded_db, setup_test_db, ITATSKAYA_TOMSKAYA, ZARYA_YURGA};
use dfz::database::entities::*;
use dfz::database::seed_data::seed_reference_data;
use dfz::errors::CalculationError;
use dfz::services::{CalculationMetaService, LineService};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, Set};

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    assert_eq!(lines::Entity::find().count(&db).await?, 0);
    assert_eq!(substations::Entity::find().count(&db).await?, 0);
    assert_eq!(components::Entity::find().count(&db).await?, 0);
    assert_eq!(protection_devices::Entity::find().count(&db).await?, 0);
    assert_eq!(protection_half_sets::Entity::find().count(&db).await?, 0);
    assert_eq!(fault_calculations::Entity::find().count(&db).await?, 0);
    assert_eq!(calculation_metas::Entity::find().count(&db).await?, 0);
    assert_eq!(settings_calculations::Entity::find().count(&db).await?, 0);
    assert_eq!(sensitivity_analyses::Entity::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_seed_populates_reference_data() -> Result<()> {
    let (db, _temp_file, summary) = setup_seeded_db().await?;

    assert_eq!(summary.components, 12);
    assert_eq!(summary.lines, 3);
    // Томская terminates two lines
    assert_eq!(summary.substations, 5);
    assert_eq!(summary.half_sets, 6);
    assert_eq!(summary.fault_calculations, 6 * 8);

    assert_eq!(substations::Entity::find().count(&db).await?, 5);
    assert_eq!(fault_calculations::Entity::find().count(&db).await?, 48);

    let device = protection_devices::Entity::find()
        .one(&db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no device"))?;
    assert_eq!(device.device_model, "ШЭ2710 582");
    assert_eq!(device.manufacturer, "НПП ЭКРА");
    let equipped = device.find_related(components::Entity).all(&db).await?;
    assert_eq!(equipped.len(), 12);

    let line = line_by_name(&db, ITATSKAYA_TOMSKAYA).await?;
    assert_eq!(line.length, Some(247.0));
    assert_eq!(line.current_capacity, 2000.0);

    Ok(())
}

#[tokio::test]
async fn test_reseed_replaces_data_and_runs() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let line = line_by_name(&db, ZARYA_YURGA).await?;
    CalculationMetaService::new(db.clone())
        .create_for_line(line.id)
        .await?;

    let summary = seed_reference_data(&db).await?;
    assert_eq!(summary.lines, 3);
    assert_eq!(lines::Entity::find().count(&db).await?, 3);
    assert_eq!(components::Entity::find().count(&db).await?, 12);
    assert_eq!(calculation_metas::Entity::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_calculation_numbers_increase_by_one() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let service = CalculationMetaService::new(db.clone());
    let zarya = line_by_name(&db, ZARYA_YURGA).await?;
    let itatskaya = line_by_name(&db, ITATSKAYA_TOMSKAYA).await?;

    assert_eq!(service.next_calculation_number().await?, 1);
    let first = service.create_for_line(zarya.id).await?;
    let second = service.create_for_line(itatskaya.id).await?;
    let third = service.create_for_line(zarya.id).await?;

    assert_eq!(first.calculation_number, 1);
    assert_eq!(second.calculation_number, 2);
    assert_eq!(third.calculation_number, 3);
    assert_eq!(service.next_calculation_number().await?, 4);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_runs_get_distinct_numbers() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let line = line_by_name(&db, ZARYA_YURGA).await?;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = CalculationMetaService::new(db.clone());
        let line_id = line.id;
        handles.push(tokio::spawn(async move {
            service.create_for_line(line_id).await
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        let meta = handle.await??;
        numbers.push(meta.calculation_number);
    }
    numbers.sort();
    assert_eq!(numbers, (1..=8).collect::<Vec<i32>>());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_calculation_number_is_rejected() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let line = line_by_name(&db, ZARYA_YURGA).await?;
    let meta = CalculationMetaService::new(db.clone())
        .create_for_line(line.id)
        .await?;

    let duplicate = calculation_metas::ActiveModel {
        calculation_number: Set(meta.calculation_number),
        line_id: Set(line.id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await;
    assert!(duplicate.is_err());

    Ok(())
}

#[tokio::test]
async fn test_list_calculations_newest_first() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let service = CalculationMetaService::new(db.clone());
    let zarya = line_by_name(&db, ZARYA_YURGA).await?;
    let itatskaya = line_by_name(&db, ITATSKAYA_TOMSKAYA).await?;

    service.create_for_line(zarya.id).await?;
    service.create_for_line(itatskaya.id).await?;

    let list = service.list_calculations().await?;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].calculation_number, 2);
    assert_eq!(list[0].line_name, ITATSKAYA_TOMSKAYA);
    assert_eq!(list[1].line_name, ZARYA_YURGA);

    Ok(())
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let metas = CalculationMetaService::new(db.clone());
    let lines = LineService::new(db.clone());

    let err = metas.create_for_line(9999).await.unwrap_err();
    assert!(matches!(err, CalculationError::LineNotFound(9999)));

    let err = metas.get_calculation(42).await.unwrap_err();
    assert!(err.is_not_found());

    let err = lines.find_by_dispatch_name("ВЛ 220 кВ Нет такой").await.unwrap_err();
    assert!(matches!(err, CalculationError::LineNotFoundByName(_)));

    Ok(())
}

#[tokio::test]
async fn test_line_half_sets_carry_names() -> Result<()> {
    let (db, _temp_file, _) = setup_seeded_db().await?;
    let service = LineService::new(db.clone());
    let line = line_by_name(&db, ZARYA_YURGA).await?;

    let half_sets = service.half_sets(line.id).await?;
    assert_eq!(half_sets.len(), 2);
    assert_eq!(half_sets[0].substation, "ПС 500 кВ Заря");
    assert_eq!(half_sets[1].substation, "ПС 500 кВ Юрга");
    assert!(half_sets.iter().all(|h| h.device_model == "ШЭ2710 582"));

    let names: Vec<String> = service
        .list_lines()
        .await?
        .into_iter()
        .map(|l| l.dispatch_name)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    Ok(())
}
