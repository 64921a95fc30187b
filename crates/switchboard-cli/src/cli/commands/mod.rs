//! CLI command handlers.

pub mod config;
pub mod dashboard;
pub mod exec;
pub mod status;
pub mod tools;
pub mod views;
