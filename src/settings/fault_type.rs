use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-circuit type of a stored fault calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultType {
    ThreePhase,
    PhaseToPhase,
    DoublePhaseToGround,
    SinglePhaseToGround,
}

impl FaultType {
    pub const ALL: [FaultType; 4] = [
        FaultType::ThreePhase,
        FaultType::PhaseToPhase,
        FaultType::DoublePhaseToGround,
        FaultType::SinglePhaseToGround,
    ];

    /// Code stored in the `fault_type` column
    pub fn code(&self) -> &'static str {
        match self {
            FaultType::ThreePhase => "К(3)",
            FaultType::PhaseToPhase => "К(2)",
            FaultType::DoublePhaseToGround => "К(1,1)",
            FaultType::SinglePhaseToGround => "К(1)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FaultType::ThreePhase => "Трехфазное КЗ",
            FaultType::PhaseToPhase => "Двухфазное КЗ",
            FaultType::DoublePhaseToGround => "Двухфазное КЗ на землю",
            FaultType::SinglePhaseToGround => "Однофазное КЗ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fault_type| fault_type.code() == code.trim())
    }
}

impl fmt::Display for FaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Joins fault type codes for log lines and error messages
pub fn join_codes(fault_types: &[FaultType]) -> String {
    fault_types
        .iter()
        .map(FaultType::code)
        .collect::<Vec<_>>()
        .join(", ")
}
