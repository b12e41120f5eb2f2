use serde::{Deserialize, Serialize};

/// Margin coefficients applied by the setting formulas
///
/// Every field can be overridden from the configuration file; fields that are
/// left out keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFactors {
    pub il_grading_factor: f64,
    pub il_reset_factor: f64,
    pub il_matching_factor: f64,
    pub i2_imbalance_factor: f64,
    pub i2_grading_factor: f64,
    pub i2_reset_factor: f64,
    pub i2_matching_factor: f64,
    pub di1_matching_factor: f64,
    pub di1_sensitivity_rate: f64,
    pub u2_grading_factor: f64,
    pub u2_reset_factor: f64,
    pub u2_imbalance_voltage: f64,
    pub voltage_transformer_factor: f64,
    pub u2_matching_factor: f64,
    pub kman_grading_factor: f64,
}

impl Default for SettingsFactors {
    fn default() -> Self {
        Self {
            il_grading_factor: 1.3,
            il_reset_factor: 0.9,
            il_matching_factor: 1.4,
            i2_imbalance_factor: 0.05,
            i2_grading_factor: 1.3,
            i2_reset_factor: 0.9,
            i2_matching_factor: 1.4,
            di1_matching_factor: 1.4,
            di1_sensitivity_rate: 2.0,
            u2_grading_factor: 1.3,
            u2_reset_factor: 0.9,
            u2_imbalance_voltage: 1.5,
            voltage_transformer_factor: 5000.0,
            u2_matching_factor: 2.0,
            kman_grading_factor: 1.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "il_grading_factor: 1.2\nu2_matching_factor: 1.5\n";
        let factors: SettingsFactors = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(factors.il_grading_factor, 1.2);
        assert_eq!(factors.u2_matching_factor, 1.5);
        assert_eq!(factors.il_reset_factor, 0.9);
        assert_eq!(factors.voltage_transformer_factor, 5000.0);
    }
}
