//! # tally-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `tally-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, including the SQL form of `ProjectQuery`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use tally_db::repositories::PgProjectRepository;
//! use tally_core::{ProjectQuery, ProjectRepository};
//!
//! async fn example(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let projects = PgProjectRepository::new(pool);
//!     let _ = projects.list(&ProjectQuery::for_workspace(1.into())).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgClientRepository, PgCompanyRepository, PgInvoiceLineItemRepository, PgProjectRepository,
    PgTimesheetEntryRepository, PgUserRepository,
};
