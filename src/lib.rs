pub mod config;
pub mod database;
pub mod errors;
pub mod services;
pub mod settings;

#[cfg(feature = "server")]
pub mod server;
