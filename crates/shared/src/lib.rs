//! Shared errors and configuration for photopin.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error taxonomy and HTTP status mapping
//! - Configuration management

pub mod config;
pub mod error;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;

pub use config::{AppConfig, AuthConfig, DatabaseConfig, GatewayConfig, S3Config, ServerConfig};
pub use error::AppError;
