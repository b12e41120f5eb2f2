use std::collections::BTreeMap;
use std::fmt;

use super::factors::SettingsFactors;
use super::fault_type::FaultType;
use super::formulas::{self, FaultRecord, LineParameters};
use crate::errors::{CalculationError, CalculationResult};

/// Protection element kinds that have a setting formula
///
/// Parsed from the `setting_designation` stored on a component row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    PhaseCurrentBlock,
    PhaseCurrentTrip,
    NegativeSequenceCurrentBlock,
    NegativeSequenceCurrentTrip,
    PositiveSequenceIncrementBlock,
    PositiveSequenceIncrementTrip,
    NegativeSequenceIncrementBlock,
    NegativeSequenceIncrementTrip,
    NegativeSequenceVoltageBlock,
    NegativeSequenceVoltageTrip,
    ManipulationFactor,
    BlockingAngle,
}

/// Everything a formula may read
pub struct CalculationContext<'a> {
    pub factors: &'a SettingsFactors,
    pub line: &'a LineParameters,
    pub faults: &'a [FaultRecord],
}

/// Unrounded formula result with the inputs it used
#[derive(Debug, Clone, PartialEq)]
pub struct SettingValue {
    pub value: f64,
    pub inputs: BTreeMap<String, f64>,
}

impl SettingValue {
    fn new(value: f64, inputs: &[(&str, f64)]) -> Self {
        Self {
            value,
            inputs: inputs
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

/// Which stored fault values a trip element is checked against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityHandler {
    pub fault_types: &'static [FaultType],
    pub fault_value_key: &'static str,
    /// Phase-current elements compare against a line-to-line quantity
    pub phase_scaled: bool,
}

const ASYMMETRIC_FAULTS: &[FaultType] = &[
    FaultType::PhaseToPhase,
    FaultType::DoublePhaseToGround,
    FaultType::SinglePhaseToGround,
];

const SYMMETRIC_FAULTS: &[FaultType] = &[FaultType::ThreePhase];

impl SensitivityHandler {
    /// Sensitivity ratio, or `None` when the setting is zero
    pub fn ratio(&self, fault_value: f64, setting_value: f64) -> Option<f64> {
        if setting_value == 0.0 {
            return None;
        }
        let ratio = fault_value / setting_value;
        Some(if self.phase_scaled { 3f64.sqrt() * ratio } else { ratio })
    }
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::PhaseCurrentBlock,
        ComponentKind::PhaseCurrentTrip,
        ComponentKind::NegativeSequenceCurrentBlock,
        ComponentKind::NegativeSequenceCurrentTrip,
        ComponentKind::PositiveSequenceIncrementBlock,
        ComponentKind::PositiveSequenceIncrementTrip,
        ComponentKind::NegativeSequenceIncrementBlock,
        ComponentKind::NegativeSequenceIncrementTrip,
        ComponentKind::NegativeSequenceVoltageBlock,
        ComponentKind::NegativeSequenceVoltageTrip,
        ComponentKind::ManipulationFactor,
        ComponentKind::BlockingAngle,
    ];

    pub fn designation(&self) -> &'static str {
        match self {
            ComponentKind::PhaseCurrentBlock => "IЛ БЛОК",
            ComponentKind::PhaseCurrentTrip => "IЛ ОТКЛ",
            ComponentKind::NegativeSequenceCurrentBlock => "I2 БЛОК",
            ComponentKind::NegativeSequenceCurrentTrip => "I2 ОТКЛ",
            ComponentKind::PositiveSequenceIncrementBlock => "DI1 БЛОК",
            ComponentKind::PositiveSequenceIncrementTrip => "DI1 ОТКЛ",
            ComponentKind::NegativeSequenceIncrementBlock => "DI2 БЛОК",
            ComponentKind::NegativeSequenceIncrementTrip => "DI2 ОТКЛ",
            ComponentKind::NegativeSequenceVoltageBlock => "U2 БЛОК",
            ComponentKind::NegativeSequenceVoltageTrip => "U2 ОТКЛ",
            ComponentKind::ManipulationFactor => "K МАН",
            ComponentKind::BlockingAngle => "φ БЛОК",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComponentKind::PhaseCurrentBlock => "Блокирующий орган по векторной разности фазных токов",
            ComponentKind::PhaseCurrentTrip => "Отключающий орган по векторной разности фазных токов",
            ComponentKind::NegativeSequenceCurrentBlock => "Блокирующий орган тока обратной последовательности",
            ComponentKind::NegativeSequenceCurrentTrip => "Отключающий орган тока обратной последовательности",
            ComponentKind::PositiveSequenceIncrementBlock => "Блокирующий орган приращения тока прямой последовательности",
            ComponentKind::PositiveSequenceIncrementTrip => "Отключающий орган приращения тока прямой последовательности",
            ComponentKind::NegativeSequenceIncrementBlock => "Блокирующий орган приращения тока обратной последовательности",
            ComponentKind::NegativeSequenceIncrementTrip => "Отключающий орган приращения тока обратной последовательности",
            ComponentKind::NegativeSequenceVoltageBlock => "Блокирующий орган напряжения обратной последовательности",
            ComponentKind::NegativeSequenceVoltageTrip => "Отключающий орган напряжения обратной последовательности",
            ComponentKind::ManipulationFactor => "Коэффициент манипуляции",
            ComponentKind::BlockingAngle => "Угол блокировки",
        }
    }

    /// Parses a stored designation; `None` means no formula exists
    pub fn from_designation(designation: &str) -> Option<Self> {
        let designation = designation.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.designation() == designation)
    }

    pub fn sensitivity_handler(&self) -> Option<SensitivityHandler> {
        match self {
            ComponentKind::PhaseCurrentTrip => Some(SensitivityHandler {
                fault_types: SYMMETRIC_FAULTS,
                fault_value_key: "I1",
                phase_scaled: true,
            }),
            ComponentKind::NegativeSequenceCurrentTrip
            | ComponentKind::NegativeSequenceIncrementTrip => Some(SensitivityHandler {
                fault_types: ASYMMETRIC_FAULTS,
                fault_value_key: "I2",
                phase_scaled: false,
            }),
            ComponentKind::NegativeSequenceVoltageTrip => Some(SensitivityHandler {
                fault_types: ASYMMETRIC_FAULTS,
                fault_value_key: "U2",
                phase_scaled: false,
            }),
            ComponentKind::PositiveSequenceIncrementTrip => Some(SensitivityHandler {
                fault_types: SYMMETRIC_FAULTS,
                fault_value_key: "I1",
                phase_scaled: false,
            }),
            _ => None,
        }
    }

    pub fn evaluate(&self, ctx: &CalculationContext<'_>) -> CalculationResult<SettingValue> {
        let f = ctx.factors;
        let capacity = ctx.line.current_capacity;

        let setting = match self {
            ComponentKind::PhaseCurrentBlock => SettingValue::new(
                formulas::phase_current_block(f, capacity),
                &[
                    ("il_grading_factor", f.il_grading_factor),
                    ("il_reset_factor", f.il_reset_factor),
                    ("current_capacity", capacity),
                ],
            ),
            ComponentKind::PhaseCurrentTrip => SettingValue::new(
                formulas::phase_current_trip(f, capacity),
                &[
                    ("il_grading_factor", f.il_grading_factor),
                    ("il_reset_factor", f.il_reset_factor),
                    ("il_matching_factor", f.il_matching_factor),
                    ("current_capacity", capacity),
                ],
            ),
            ComponentKind::NegativeSequenceCurrentBlock
            | ComponentKind::NegativeSequenceIncrementBlock => SettingValue::new(
                formulas::negative_sequence_current_block(f, capacity),
                &[
                    ("i2_imbalance_factor", f.i2_imbalance_factor),
                    ("i2_grading_factor", f.i2_grading_factor),
                    ("i2_reset_factor", f.i2_reset_factor),
                    ("current_capacity", capacity),
                ],
            ),
            ComponentKind::NegativeSequenceCurrentTrip
            | ComponentKind::NegativeSequenceIncrementTrip => SettingValue::new(
                formulas::negative_sequence_current_trip(f, capacity),
                &[
                    ("i2_imbalance_factor", f.i2_imbalance_factor),
                    ("i2_grading_factor", f.i2_grading_factor),
                    ("i2_reset_factor", f.i2_reset_factor),
                    ("i2_matching_factor", f.i2_matching_factor),
                    ("current_capacity", capacity),
                ],
            ),
            ComponentKind::PositiveSequenceIncrementTrip => SettingValue::new(
                formulas::positive_sequence_increment_trip(f, ctx.line, ctx.faults)?,
                &[("di1_sensitivity_rate", f.di1_sensitivity_rate)],
            ),
            ComponentKind::PositiveSequenceIncrementBlock => SettingValue::new(
                formulas::positive_sequence_increment_block(f, ctx.line, ctx.faults)?,
                &[
                    ("di1_sensitivity_rate", f.di1_sensitivity_rate),
                    ("di1_matching_factor", f.di1_matching_factor),
                ],
            ),
            ComponentKind::NegativeSequenceVoltageBlock => SettingValue::new(
                formulas::negative_sequence_voltage_block(f),
                &[
                    ("u2_grading_factor", f.u2_grading_factor),
                    ("u2_reset_factor", f.u2_reset_factor),
                    ("u2_imbalance_voltage", f.u2_imbalance_voltage),
                    ("voltage_transformer_factor", f.voltage_transformer_factor),
                ],
            ),
            ComponentKind::NegativeSequenceVoltageTrip => SettingValue::new(
                formulas::negative_sequence_voltage_trip(f),
                &[
                    ("u2_grading_factor", f.u2_grading_factor),
                    ("u2_reset_factor", f.u2_reset_factor),
                    ("u2_imbalance_voltage", f.u2_imbalance_voltage),
                    ("voltage_transformer_factor", f.voltage_transformer_factor),
                    ("u2_matching_factor", f.u2_matching_factor),
                ],
            ),
            ComponentKind::ManipulationFactor => SettingValue::new(
                formulas::manipulation_factor(f, ctx.line, ctx.faults)?,
                &[
                    ("kman_grading_factor", f.kman_grading_factor),
                    ("current_capacity", capacity),
                ],
            ),
            ComponentKind::BlockingAngle => {
                let length = ctx
                    .line
                    .length
                    .ok_or_else(|| CalculationError::MissingLineLength(ctx.line.dispatch_name.clone()))?;
                SettingValue::new(formulas::blocking_angle(length), &[("length", length)])
            }
        };

        Ok(setting)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(length: Option<f64>) -> LineParameters {
        LineParameters {
            dispatch_name: "ВЛ 500 кВ Заря - Юрга".to_string(),
            current_capacity: 2000.0,
            length,
        }
    }

    #[test]
    fn designations_parse_back() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_designation(kind.designation()), Some(kind));
        }
        assert_eq!(
            ComponentKind::from_designation("  IЛ БЛОК "),
            Some(ComponentKind::PhaseCurrentBlock)
        );
        assert_eq!(ComponentKind::from_designation("Z1 ОТКЛ"), None);
    }

    #[test]
    fn di2_shares_negative_sequence_formulas() {
        let factors = SettingsFactors::default();
        let line = line(Some(100.0));
        let ctx = CalculationContext {
            factors: &factors,
            line: &line,
            faults: &[],
        };

        let i2 = ComponentKind::NegativeSequenceCurrentTrip.evaluate(&ctx).unwrap();
        let di2 = ComponentKind::NegativeSequenceIncrementTrip.evaluate(&ctx).unwrap();
        assert_eq!(i2, di2);
        assert_eq!(i2.inputs["i2_matching_factor"], 1.4);
    }

    #[test]
    fn blocking_angle_needs_length() {
        let factors = SettingsFactors::default();
        let line = line(None);
        let ctx = CalculationContext {
            factors: &factors,
            line: &line,
            faults: &[],
        };

        let err = ComponentKind::BlockingAngle.evaluate(&ctx).unwrap_err();
        assert!(matches!(err, CalculationError::MissingLineLength(_)));
    }

    #[test]
    fn blocking_angle_records_length_input() {
        let factors = SettingsFactors::default();
        let line = line(Some(180.0));
        let ctx = CalculationContext {
            factors: &factors,
            line: &line,
            faults: &[],
        };

        let setting = ComponentKind::BlockingAngle.evaluate(&ctx).unwrap();
        assert_eq!(setting.value, 65.0);
        assert_eq!(setting.inputs["length"], 180.0);
    }

    #[test]
    fn di1_block_reads_fault_records() {
        let factors = SettingsFactors::default();
        let line = line(Some(100.0));
        let faults = vec![FaultRecord {
            id: 1,
            fault_type: FaultType::ThreePhase,
            values: json!({"I1": 5600.0}),
        }];
        let ctx = CalculationContext {
            factors: &factors,
            line: &line,
            faults: &faults,
        };

        let block = ComponentKind::PositiveSequenceIncrementBlock.evaluate(&ctx).unwrap();
        assert!((block.value - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn only_trip_elements_have_sensitivity_handlers() {
        assert!(ComponentKind::PhaseCurrentBlock.sensitivity_handler().is_none());
        assert!(ComponentKind::BlockingAngle.sensitivity_handler().is_none());

        let handler = ComponentKind::PhaseCurrentTrip.sensitivity_handler().unwrap();
        assert_eq!(handler.fault_types, &[FaultType::ThreePhase]);
        assert_eq!(handler.fault_value_key, "I1");

        let handler = ComponentKind::NegativeSequenceIncrementTrip
            .sensitivity_handler()
            .unwrap();
        assert_eq!(handler.fault_types.len(), 3);
        assert_eq!(handler.fault_value_key, "I2");
    }

    #[test]
    fn sensitivity_ratio_scaling_and_zero_guard() {
        let phase = ComponentKind::PhaseCurrentTrip.sensitivity_handler().unwrap();
        let ratio = phase.ratio(7005.0, 7005.0).unwrap();
        assert!((ratio - 3f64.sqrt()).abs() < 1e-12);

        let plain = ComponentKind::NegativeSequenceCurrentTrip
            .sensitivity_handler()
            .unwrap();
        assert_eq!(plain.ratio(1000.0, 200.0), Some(5.0));
        assert_eq!(plain.ratio(1000.0, 0.0), None);
    }
}
