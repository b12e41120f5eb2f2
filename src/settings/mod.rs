//! Setting formulas for differential high-frequency line protection (ДФЗ)
//!
//! Pure domain code: designation parsing, margin factors, fault types and the
//! closed-form formulas. Services in [`crate::services`] load rows from the
//! database and hand them to this module.

pub mod component;
pub mod factors;
pub mod fault_type;
pub mod formulas;

pub use component::{CalculationContext, ComponentKind, SensitivityHandler, SettingValue};
pub use factors::SettingsFactors;
pub use fault_type::FaultType;
pub use formulas::{round_to, FaultRecord, LineParameters};
