pub mod config;
pub mod error;
pub mod fred;
pub mod indicators;
pub mod portfolio;
pub mod telemetry;
