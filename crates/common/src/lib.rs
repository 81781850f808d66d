//! Intake Common Library
//!
//! Shared code for the intake service including:
//! - Database models and the repository
//! - Error types and handling
//! - Configuration management
//! - Domain validation helpers
//! - Metrics and observability

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
