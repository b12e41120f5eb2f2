#![allow(dead_code)]

use anyhow::Result;
use dfz::database::entities::lines;
use dfz::database::seed_data::{seed_reference_data, SeedSummary};
use dfz::database::setup_database;
use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter};
use tempfile::NamedTempFile;

pub const ZARYA_YURGA: &str = "ВЛ 500 кВ Заря - Юрга";
pub const ITATSKAYA_TOMSKAYA: &str = "ВЛ 500 кВ Итатская - Томская";

/// Migrated database on a temporary file
pub async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

pub async fn setup_seeded_db() -> Result<(DatabaseConnection, NamedTempFile, SeedSummary)> {
    let (db, temp_file) = setup_test_db().await?;
    let summary = seed_reference_data(&db).await?;
    Ok((db, temp_file, summary))
}

pub async fn line_by_name(db: &DatabaseConnection, dispatch_name: &str) -> Result<lines::Model> {
    let line = lines::Entity::find()
        .filter(lines::Column::DispatchName.eq(dispatch_name))
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("line {} not seeded", dispatch_name))?;
    Ok(line)
}
