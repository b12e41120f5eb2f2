use anyhow::Result;
use sea_orm::*;
use serde_json::json;
use tracing::info;

use crate::database::entities::{
    components, device_components, fault_calculations, lines, protection_devices,
    protection_half_sets, substations,
};
use crate::settings::{ComponentKind, FaultType};

const DEVICE_MODEL: &str = "ШЭ2710 582";
const MANUFACTURER: &str = "НПП ЭКРА";

/// (dispatch name, simulation name, length km, [(substation, three-phase current A)])
const LINES: [(&str, &str, f64, [(&str, f64); 2]); 3] = [
    (
        "ВЛ 500 кВ Ново-Анжерская - Томская",
        "Ново-Анжерская - Томская",
        98.5,
        [("ПС 500 кВ Ново-Анжерская", 9400.0), ("ПС 500 кВ Томская", 7800.0)],
    ),
    (
        "ВЛ 500 кВ Итатская - Томская",
        "Итатская - Томская",
        247.0,
        [("ПС 500 кВ Итатская", 11200.0), ("ПС 500 кВ Томская", 6900.0)],
    ),
    (
        "ВЛ 500 кВ Заря - Юрга",
        "Заря - Юрга",
        56.2,
        [("ПС 500 кВ Заря", 8600.0), ("ПС 500 кВ Юрга", 7300.0)],
    ),
];

/// Network topologies and the share of the normal-topology current they deliver
const TOPOLOGIES: [(&str, f64); 2] = [
    ("Нормальная схема", 1.0),
    ("Ремонт автотрансформатора на противоположной ПС", 0.8),
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub components: usize,
    pub lines: usize,
    pub substations: usize,
    pub half_sets: usize,
    pub fault_calculations: usize,
}

/// Replaces reference data with the demonstration set
///
/// Calculation runs hang off lines and are removed by the cascade.
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<SeedSummary> {
    info!("Clearing reference data");
    lines::Entity::delete_many().exec(db).await?;
    substations::Entity::delete_many().exec(db).await?;
    protection_devices::Entity::delete_many().exec(db).await?;
    components::Entity::delete_many().exec(db).await?;

    let mut summary = SeedSummary::default();

    let mut component_ids = Vec::new();
    for kind in ComponentKind::ALL {
        let component = components::ActiveModel {
            setting_designation: Set(kind.designation().to_string()),
            description: Set(Some(kind.description().to_string())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        component_ids.push(component.id);
    }
    summary.components = component_ids.len();
    info!("Created {} components", summary.components);

    let device = protection_devices::ActiveModel {
        device_model: Set(DEVICE_MODEL.to_string()),
        manufacturer: Set(MANUFACTURER.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let equipment: Vec<device_components::ActiveModel> = component_ids
        .iter()
        .map(|component_id| device_components::ActiveModel {
            protection_device_id: Set(device.id),
            component_id: Set(*component_id),
            ..Default::default()
        })
        .collect();
    device_components::Entity::insert_many(equipment).exec(db).await?;
    info!("Created protection device {} ({})", DEVICE_MODEL, MANUFACTURER);

    for (dispatch_name, pf_name, length, ends) in LINES {
        let line = lines::ActiveModel {
            dispatch_name: Set(dispatch_name.to_string()),
            pf_name: Set(Some(pf_name.to_string())),
            current_capacity: Set(2000.0),
            length: Set(Some(length)),
            ..Default::default()
        }
        .insert(db)
        .await?;
        summary.lines += 1;

        for (substation_name, three_phase_current) in ends {
            let (substation, created) = find_or_create_substation(db, substation_name).await?;
            if created {
                summary.substations += 1;
            }

            let half_set = protection_half_sets::ActiveModel {
                line_id: Set(line.id),
                substation_id: Set(substation.id),
                protection_device_id: Set(device.id),
                ..Default::default()
            }
            .insert(db)
            .await?;
            summary.half_sets += 1;

            summary.fault_calculations +=
                create_fault_calculations(db, half_set.id, &line, three_phase_current).await?;
        }

        info!("Created line {}", dispatch_name);
    }

    info!(
        "Seeded {} lines, {} substations, {} half-sets, {} fault calculations",
        summary.lines, summary.substations, summary.half_sets, summary.fault_calculations
    );
    Ok(summary)
}

async fn find_or_create_substation(
    db: &DatabaseConnection,
    dispatch_name: &str,
) -> Result<(substations::Model, bool)> {
    let existing = substations::Entity::find()
        .filter(substations::Column::DispatchName.eq(dispatch_name))
        .one(db)
        .await?;

    if let Some(substation) = existing {
        return Ok((substation, false));
    }

    let substation = substations::ActiveModel {
        dispatch_name: Set(dispatch_name.to_string()),
        pf_name: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok((substation, true))
}

/// Symmetrical-component values for a fault at the remote bus, assuming Z1 = Z2
fn fault_values(fault_type: FaultType, three_phase_current: f64) -> serde_json::Value {
    let ik3 = three_phase_current.round();
    match fault_type {
        FaultType::ThreePhase => json!({"I1": ik3, "I2": 0.0, "U2": 0.0}),
        FaultType::PhaseToPhase => json!({
            "I1": (ik3 / 2.0).round(),
            "I2": (ik3 / 2.0).round(),
            "U2": (ik3 * 0.0045).round(),
        }),
        FaultType::DoublePhaseToGround => json!({
            "I1": (ik3 * 0.6).round(),
            "I2": (ik3 * 0.3).round(),
            "U2": (ik3 * 0.0027).round(),
        }),
        FaultType::SinglePhaseToGround => json!({
            "I1": (ik3 / 3.0).round(),
            "I2": (ik3 / 3.0).round(),
            "U2": (ik3 * 0.003).round(),
        }),
    }
}

async fn create_fault_calculations(
    db: &DatabaseConnection,
    half_set_id: i32,
    line: &lines::Model,
    three_phase_current: f64,
) -> Result<usize> {
    let location = format!("Шины противоположного конца {}", line.dispatch_name);
    let mut rows = Vec::new();

    for (topology, share) in TOPOLOGIES {
        for fault_type in FaultType::ALL {
            rows.push(fault_calculations::ActiveModel {
                protection_half_set_id: Set(half_set_id),
                fault_type: Set(fault_type.code().to_string()),
                fault_location: Set(location.clone()),
                network_topology: Set(topology.to_string()),
                fault_values: Set(fault_values(fault_type, three_phase_current * share)),
                ..Default::default()
            });
        }
    }

    let count = rows.len();
    fault_calculations::Entity::insert_many(rows).exec(db).await?;
    Ok(count)
}
