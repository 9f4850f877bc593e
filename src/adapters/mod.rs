//! Concrete port implementations.

pub mod console_progress;
pub mod csv_adapter;
pub mod file_config_adapter;
