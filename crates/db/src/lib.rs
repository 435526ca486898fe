//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - The `pollution_checks` entity
//! - [`PollutionCheckRepository`] for inserts and report aggregation
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::PollutionCheckRepository;

use std::time::Duration;

use puc_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// Connect and acquire waits are both bounded by `connect_timeout_secs`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let timeout = Duration::from_secs(config.connect_timeout_secs);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(timeout)
        .acquire_timeout(timeout);

    Database::connect(options).await
}
