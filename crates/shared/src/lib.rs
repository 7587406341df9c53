//! Shared value types, errors, and configuration for Khata.
//!
//! This crate provides common types used across all other crates:
//! - Signed balances and their (magnitude, direction) form
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CompanyConfig, EngineConfig, LinePolicy};
pub use error::{AppError, AppResult};
