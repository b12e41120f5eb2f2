pub mod calculation_meta_service;
pub mod line_service;
pub mod sensitivity_analysis_service;
pub mod settings_calculation_service;

pub use calculation_meta_service::*;
pub use line_service::*;
pub use sensitivity_analysis_service::*;
pub use settings_calculation_service::*;
