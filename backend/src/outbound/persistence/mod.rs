//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each adapter implements one domain repository port over a shared
//! [`DbPool`]. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module; adapters translate them into domain values
//! and map Diesel failures into the port's error type.
//!
//! ```ignore
//! use shopping_list::outbound::persistence::{DbPool, DieselShoppingListRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shopping")).await?;
//! let lists = DieselShoppingListRepository::new(pool.clone());
//! ```

mod diesel_basic_error_mapping;
mod diesel_item_repository;
mod diesel_member_repository;
mod diesel_shopping_list_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use diesel_shopping_list_repository::DieselShoppingListRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
