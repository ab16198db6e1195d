//! Concrete adapter implementations for the port traits.

pub mod csv_adapter;
pub mod json_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
