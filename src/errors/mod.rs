//! Domain-specific error types for the settings calculation core
//!
//! Everything that can stop a settings calculation or sensitivity analysis
//! run is expressed as a [`CalculationError`]. Application glue (CLI, server
//! startup, seeding) keeps using `anyhow::Result`.
//!
//! # Examples
//!
//! ```rust
//! use dfz::errors::CalculationError;
//!
//! let err = CalculationError::CalculationNotFound(7);
//! assert!(err.is_not_found());
//!
//! let err = CalculationError::MissingFaultValue {
//!     key: "I1".to_string(),
//!     fault_calculation_id: 3,
//! };
//! assert!(err.is_data_error());
//! ```

pub mod calculation;

pub use calculation::CalculationError;

/// Result type alias for calculation and sensitivity operations
pub type CalculationResult<T> = Result<T, CalculationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_result_alias() {
        let result: CalculationResult<f64> = Err(CalculationError::LineNotFound(1));
        assert!(result.is_err());
    }
}
