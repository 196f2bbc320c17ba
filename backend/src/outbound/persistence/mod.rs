//! PostgreSQL persistence adapters using Diesel with `diesel-async`.
//!
//! Repositories translate between internal row structs (`models`) and
//! domain types; the row structs and table definitions (`schema`) never
//! leave this module. Connections come from a `bb8` pool.
//!
//! ```ignore
//! use storefront::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/storefront")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_catalogue_repository;
mod diesel_error_mapping;
mod diesel_order_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_repository::{
    DieselCategoryRepository, DieselProductRepository, DieselSubcategoryRepository,
};
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
