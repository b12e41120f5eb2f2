//! Closed-form setting formulas
//!
//! All currents are in amperes, voltages in volts, lengths in kilometres and
//! angles in degrees. Nothing here touches the database: fault data arrives
//! as [`FaultRecord`] values already loaded by the calculation service.

use serde_json::Value;

use super::factors::SettingsFactors;
use super::fault_type::{join_codes, FaultType};
use crate::errors::{CalculationError, CalculationResult};

/// Length thresholds (km) of the blocking angle step function
pub const SHORT_LINE_KM: f64 = 60.0;
pub const LONG_LINE_KM: f64 = 150.0;

/// Line attributes the formulas read
#[derive(Debug, Clone, PartialEq)]
pub struct LineParameters {
    pub dispatch_name: String,
    pub current_capacity: f64,
    pub length: Option<f64>,
}

/// One stored short-circuit calculation
#[derive(Debug, Clone, PartialEq)]
pub struct FaultRecord {
    pub id: i32,
    pub fault_type: FaultType,
    pub values: Value,
}

impl FaultRecord {
    /// Reads a numeric entry from the loosely typed value map
    pub fn value(&self, key: &str) -> CalculationResult<f64> {
        let raw = self
            .values
            .get(key)
            .ok_or_else(|| CalculationError::MissingFaultValue {
                key: key.to_string(),
                fault_calculation_id: self.id,
            })?;

        raw.as_f64().ok_or_else(|| CalculationError::InvalidFaultValue {
            key: key.to_string(),
            fault_calculation_id: self.id,
        })
    }
}

/// Rounds half to even at the given number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

pub fn phase_current_block(factors: &SettingsFactors, current_capacity: f64) -> f64 {
    3f64.sqrt() * factors.il_grading_factor / factors.il_reset_factor * current_capacity
}

pub fn phase_current_trip(factors: &SettingsFactors, current_capacity: f64) -> f64 {
    round_to(
        factors.il_matching_factor * phase_current_block(factors, current_capacity),
        2,
    )
}

pub fn negative_sequence_current_block(factors: &SettingsFactors, current_capacity: f64) -> f64 {
    let imbalance_current = factors.i2_imbalance_factor * current_capacity;
    factors.i2_grading_factor / factors.i2_reset_factor * imbalance_current
}

pub fn negative_sequence_current_trip(factors: &SettingsFactors, current_capacity: f64) -> f64 {
    factors.i2_matching_factor * negative_sequence_current_block(factors, current_capacity)
}

pub fn negative_sequence_voltage_block(factors: &SettingsFactors) -> f64 {
    factors.u2_grading_factor / factors.u2_reset_factor
        * (factors.u2_imbalance_voltage * factors.voltage_transformer_factor)
        / 1000.0
}

pub fn negative_sequence_voltage_trip(factors: &SettingsFactors) -> f64 {
    factors.u2_matching_factor * negative_sequence_voltage_block(factors)
}

/// DI1 trip: weakest three-phase positive-sequence current over the sensitivity rate
pub fn positive_sequence_increment_trip(
    factors: &SettingsFactors,
    line: &LineParameters,
    faults: &[FaultRecord],
) -> CalculationResult<f64> {
    let mut min_i1: Option<f64> = None;
    for fault in faults
        .iter()
        .filter(|fault| fault.fault_type == FaultType::ThreePhase)
    {
        let i1 = fault.value("I1")?;
        min_i1 = Some(min_i1.map_or(i1, |current| current.min(i1)));
    }

    let min_i1 = min_i1.ok_or_else(|| CalculationError::NoFaultData {
        fault_types: FaultType::ThreePhase.code().to_string(),
        line: line.dispatch_name.clone(),
    })?;

    Ok(min_i1 / factors.di1_sensitivity_rate)
}

pub fn positive_sequence_increment_block(
    factors: &SettingsFactors,
    line: &LineParameters,
    faults: &[FaultRecord],
) -> CalculationResult<f64> {
    let trip = positive_sequence_increment_trip(factors, line, faults)?;
    Ok(trip / factors.di1_matching_factor)
}

/// Fault types the manipulation factor is checked against
pub const MANIPULATION_FAULT_TYPES: [FaultType; 2] = [
    FaultType::SinglePhaseToGround,
    FaultType::DoublePhaseToGround,
];

/// K МАН: the negative-sequence share of the manipulation current must
/// dominate the positive-sequence fault current plus full load current
pub fn manipulation_factor(
    factors: &SettingsFactors,
    line: &LineParameters,
    faults: &[FaultRecord],
) -> CalculationResult<f64> {
    let mut max_candidate: Option<f64> = None;
    for fault in faults
        .iter()
        .filter(|fault| MANIPULATION_FAULT_TYPES.contains(&fault.fault_type))
    {
        let i1 = fault.value("I1")?;
        let i2 = fault.value("I2")?;
        if i2 == 0.0 {
            return Err(CalculationError::ZeroFaultValue {
                key: "I2".to_string(),
                fault_calculation_id: fault.id,
            });
        }

        let candidate = factors.kman_grading_factor * (i1 + line.current_capacity) / i2;
        max_candidate = Some(max_candidate.map_or(candidate, |current| current.max(candidate)));
    }

    max_candidate.ok_or_else(|| CalculationError::NoFaultData {
        fault_types: join_codes(&MANIPULATION_FAULT_TYPES),
        line: line.dispatch_name.clone(),
    })
}

/// Blocking angle step function of line length
pub fn blocking_angle(length_km: f64) -> f64 {
    if length_km < SHORT_LINE_KM {
        50.0
    } else if length_km < LONG_LINE_KM {
        60.0
    } else {
        65.0
    }
}
