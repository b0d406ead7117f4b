//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Async-safe pooling**: Connections are managed via `bb8` pools with
//!   proper async integration through `diesel-async`.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use playforge_backend::outbound::persistence::{DbPool, PoolConfig, DieselProjectRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/playforge");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselProjectRepository::new(pool);
//! ```

mod diesel_engagement_repository;
mod diesel_error_mapping;
mod diesel_project_repository;
mod diesel_user_repository;
mod diesel_version_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_engagement_repository::DieselEngagementRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_version_repository::DieselVersionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
