use thiserror::Error;

/// Errors raised while computing settings or sensitivity ratios
#[derive(Error, Debug)]
pub enum CalculationError {
    /// Line not found by ID
    #[error("Line {0} not found")]
    LineNotFound(i32),

    /// Line not found by dispatch name
    #[error("Line '{0}' not found")]
    LineNotFoundByName(String),

    /// Calculation run not found by ID
    #[error("Calculation {0} not found")]
    CalculationNotFound(i32),

    /// No fault calculation records of the required types exist
    #[error("No fault calculations of type {fault_types} for line '{line}'")]
    NoFaultData {
        /// Comma-separated fault type codes that were searched
        fault_types: String,
        /// Line dispatch name
        line: String,
    },

    /// Fault value map has no entry for the requested key
    #[error("Fault calculation {fault_calculation_id} has no value '{key}'")]
    MissingFaultValue {
        key: String,
        fault_calculation_id: i32,
    },

    /// Fault value map entry is not a number
    #[error("Fault calculation {fault_calculation_id} value '{key}' is not a number")]
    InvalidFaultValue {
        key: String,
        fault_calculation_id: i32,
    },

    /// Fault value used as a divisor is zero
    #[error("Fault calculation {fault_calculation_id} value '{key}' is zero")]
    ZeroFaultValue {
        key: String,
        fault_calculation_id: i32,
    },

    /// Setting value used as a divisor is zero
    #[error("Settings calculation {0} has a zero result value")]
    ZeroSetting(i32),

    /// Blocking angle requested for a line without a length
    #[error("Line '{0}' has no length")]
    MissingLineLength(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Factor map could not be serialised
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalculationError {
    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CalculationError::LineNotFound(_)
                | CalculationError::LineNotFoundByName(_)
                | CalculationError::CalculationNotFound(_)
        )
    }

    /// Check if the stored input data made the run impossible
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CalculationError::NoFaultData { .. }
                | CalculationError::MissingFaultValue { .. }
                | CalculationError::InvalidFaultValue { .. }
                | CalculationError::ZeroFaultValue { .. }
                | CalculationError::ZeroSetting(_)
                | CalculationError::MissingLineLength(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        let err = CalculationError::LineNotFound(42);
        assert_eq!(err.to_string(), "Line 42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_data_error());

        let err = CalculationError::CalculationNotFound(5);
        assert_eq!(err.to_string(), "Calculation 5 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_no_fault_data_message() {
        let err = CalculationError::NoFaultData {
            fault_types: "К(3)".to_string(),
            line: "ВЛ 500 кВ Заря - Юрга".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No fault calculations of type К(3) for line 'ВЛ 500 кВ Заря - Юрга'"
        );
        assert!(err.is_data_error());
    }

    #[test]
    fn test_zero_setting_is_data_error() {
        let err = CalculationError::ZeroSetting(9);
        assert_eq!(err.to_string(), "Settings calculation 9 has a zero result value");
        assert!(err.is_data_error());
    }

    #[test]
    fn test_database_error_conversion() {
        let err: CalculationError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, CalculationError::Database(_)));
        assert!(!err.is_not_found());
    }
}
