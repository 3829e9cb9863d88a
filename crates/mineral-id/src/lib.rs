pub mod config;
pub mod error;
pub mod identification;
pub mod telemetry;
