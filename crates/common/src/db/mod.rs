//! Database layer for the intake service
//!
//! Provides:
//! - SeaORM entity models
//! - Repository pattern for data access
//! - Connection pool management
//! - Idempotent schema bootstrap

pub mod models;
mod repository;

pub use repository::{AnswerView, DeletedForm, EntrySummary, Repository};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Schema DDL, applied at startup. Every statement is idempotent.
const SCHEMA_SQL: &str = include_str!("../../../../migrations/0001_init.sql");

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database...");

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!("Database connection established");

        Ok(Self { conn })
    }

    /// Get the shared connection handle
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply the schema DDL (CREATE TABLE IF NOT EXISTS and friends)
    pub async fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute_unprepared(SCHEMA_SQL)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Schema bootstrap failed: {}", e),
            })?;

        info!("Schema bootstrap complete");
        Ok(())
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}
