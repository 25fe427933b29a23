//! # ssr-db
//!
//! PostgreSQL implementations of the repository traits defined in `ssr-core`.
//!
//! - Connection pool and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ssr_db::{create_pool, run_migrations, PgControlRepository};
//!
//! async fn example(config: &ssr_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool, &config.migrations_dir).await?;
//!     let controls = PgControlRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolSettings};
pub use repositories::{
    PgAssociationRepository, PgAuditLogRepository, PgControlRepository,
    PgRejectionReasonRepository, PgUserRepository,
};
