pub mod calculation_metas;
pub mod components;
pub mod device_components;
pub mod fault_calculations;
pub mod lines;
pub mod protection_devices;
pub mod protection_half_sets;
pub mod sensitivity_analyses;
pub mod settings_calculations;
pub mod substations;
