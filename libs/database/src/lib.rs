//! PostgreSQL connection management for the users service.
//!
//! - [`postgres`]: pool configuration, connecting (optionally with retry),
//!   running a [`sea_orm_migration::MigratorTrait`] and health checks.
//! - [`common`]: the shared error type and the exponential backoff helper.
//!
//! # Features
//!
//! - `config` (default): `PostgresConfig` implements `core_config::FromEnv`
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "users_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
