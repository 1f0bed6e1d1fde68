pub mod admissions;
pub mod config;
pub mod error;
pub mod i18n;
pub mod telemetry;
pub mod tickets;
