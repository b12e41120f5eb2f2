use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CalculationMetas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CalculationMetas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CalculationMetas::CalculationNumber)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CalculationMetas::LineId).integer().not_null())
                    .col(
                        ColumnDef::new(CalculationMetas::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-calculation_metas-line_id")
                            .from(CalculationMetas::Table, CalculationMetas::LineId)
                            .to(Lines::Table, Lines::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SettingsCalculations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SettingsCalculations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SettingsCalculations::CalculationMetaId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SettingsCalculations::ProtectionHalfSetId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SettingsCalculations::ComponentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SettingsCalculations::ResultValue)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SettingsCalculations::Factors).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-settings_calculations-calculation_meta_id")
                            .from(SettingsCalculations::Table, SettingsCalculations::CalculationMetaId)
                            .to(CalculationMetas::Table, CalculationMetas::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-settings_calculations-protection_half_set_id")
                            .from(SettingsCalculations::Table, SettingsCalculations::ProtectionHalfSetId)
                            .to(ProtectionHalfSets::Table, ProtectionHalfSets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-settings_calculations-component_id")
                            .from(SettingsCalculations::Table, SettingsCalculations::ComponentId)
                            .to(Components::Table, Components::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-settings_calculations-calculation_meta_id")
                    .table(SettingsCalculations::Table)
                    .col(SettingsCalculations::CalculationMetaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SensitivityAnalyses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SensitivityAnalyses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SensitivityAnalyses::SettingsCalculationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SensitivityAnalyses::FaultCalculationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SensitivityAnalyses::SensitivityRate)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sensitivity_analyses-settings_calculation_id")
                            .from(SensitivityAnalyses::Table, SensitivityAnalyses::SettingsCalculationId)
                            .to(SettingsCalculations::Table, SettingsCalculations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sensitivity_analyses-fault_calculation_id")
                            .from(SensitivityAnalyses::Table, SensitivityAnalyses::FaultCalculationId)
                            .to(FaultCalculations::Table, FaultCalculations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SensitivityAnalyses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SettingsCalculations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CalculationMetas::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum CalculationMetas {
    Table,
    Id,
    CalculationNumber,
    LineId,
    CreatedAt,
}

#[derive(Iden)]
enum SettingsCalculations {
    Table,
    Id,
    CalculationMetaId,
    ProtectionHalfSetId,
    ComponentId,
    ResultValue,
    Factors,
}

#[derive(Iden)]
enum SensitivityAnalyses {
    Table,
    Id,
    SettingsCalculationId,
    FaultCalculationId,
    SensitivityRate,
}

#[derive(Iden)]
enum Lines {
    Table,
    Id,
}

#[derive(Iden)]
enum ProtectionHalfSets {
    Table,
    Id,
}

#[derive(Iden)]
enum Components {
    Table,
    Id,
}

#[derive(Iden)]
enum FaultCalculations {
    Table,
    Id,
}
