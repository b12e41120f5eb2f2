use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Lines::DispatchName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lines::PfName).string())
                    .col(
                        ColumnDef::new(Lines::CurrentCapacity)
                            .double()
                            .not_null()
                            .default(2000.0),
                    )
                    .col(ColumnDef::new(Lines::Length).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Substations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Substations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Substations::DispatchName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Substations::PfName).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Components::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Components::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Components::SettingDesignation)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Components::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProtectionDevices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProtectionDevices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProtectionDevices::DeviceModel)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ProtectionDevices::Manufacturer).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeviceComponents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceComponents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DeviceComponents::ProtectionDeviceId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeviceComponents::ComponentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-device_components-protection_device_id")
                            .from(DeviceComponents::Table, DeviceComponents::ProtectionDeviceId)
                            .to(ProtectionDevices::Table, ProtectionDevices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-device_components-component_id")
                            .from(DeviceComponents::Table, DeviceComponents::ComponentId)
                            .to(Components::Table, Components::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProtectionHalfSets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProtectionHalfSets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProtectionHalfSets::LineId).integer().not_null())
                    .col(
                        ColumnDef::new(ProtectionHalfSets::SubstationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProtectionHalfSets::ProtectionDeviceId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-protection_half_sets-line_id")
                            .from(ProtectionHalfSets::Table, ProtectionHalfSets::LineId)
                            .to(Lines::Table, Lines::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-protection_half_sets-substation_id")
                            .from(ProtectionHalfSets::Table, ProtectionHalfSets::SubstationId)
                            .to(Substations::Table, Substations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-protection_half_sets-protection_device_id")
                            .from(ProtectionHalfSets::Table, ProtectionHalfSets::ProtectionDeviceId)
                            .to(ProtectionDevices::Table, ProtectionDevices::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-protection_half_sets-line_substation")
                    .table(ProtectionHalfSets::Table)
                    .col(ProtectionHalfSets::LineId)
                    .col(ProtectionHalfSets::SubstationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FaultCalculations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FaultCalculations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FaultCalculations::ProtectionHalfSetId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FaultCalculations::FaultType).string().not_null())
                    .col(ColumnDef::new(FaultCalculations::FaultLocation).string().not_null())
                    .col(
                        ColumnDef::new(FaultCalculations::NetworkTopology)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FaultCalculations::FaultValues).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-fault_calculations-protection_half_set_id")
                            .from(FaultCalculations::Table, FaultCalculations::ProtectionHalfSetId)
                            .to(ProtectionHalfSets::Table, ProtectionHalfSets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-fault_calculations-half_set_fault_type")
                    .table(FaultCalculations::Table)
                    .col(FaultCalculations::ProtectionHalfSetId)
                    .col(FaultCalculations::FaultType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FaultCalculations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProtectionHalfSets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceComponents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProtectionDevices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Components::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Substations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lines::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Lines {
    Table,
    Id,
    DispatchName,
    PfName,
    CurrentCapacity,
    Length,
}

#[derive(Iden)]
enum Substations {
    Table,
    Id,
    DispatchName,
    PfName,
}

#[derive(Iden)]
enum Components {
    Table,
    Id,
    SettingDesignation,
    Description,
}

#[derive(Iden)]
enum ProtectionDevices {
    Table,
    Id,
    DeviceModel,
    Manufacturer,
}

#[derive(Iden)]
enum DeviceComponents {
    Table,
    Id,
    ProtectionDeviceId,
    ComponentId,
}

#[derive(Iden)]
enum ProtectionHalfSets {
    Table,
    Id,
    LineId,
    SubstationId,
    ProtectionDeviceId,
}

#[derive(Iden)]
enum FaultCalculations {
    Table,
    Id,
    ProtectionHalfSetId,
    FaultType,
    FaultLocation,
    NetworkTopology,
    FaultValues,
}
