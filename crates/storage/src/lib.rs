//! Persistence collaborator for the order management system.
//!
//! This crate owns the repository contracts the application services depend
//! on, plus two implementations:
//! - [`InMemoryStore`] — a lock-guarded in-memory database for tests and
//!   lightweight wiring
//! - the `Pg*Repository` family — PostgreSQL over `sqlx` with hand-written
//!   SQL and explicit row→entity mapping

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use config::DatabaseConfig;
pub use error::{Result, StorageError};
pub use memory::InMemoryStore;
pub use postgres::{
    PgCustomerRepository, PgOrderItemRepository, PgOrderRepository, PgProductRepository,
    run_migrations,
};
pub use repository::{
    CustomerRepository, OrderItemRepository, OrderRepository, ProductRepository,
};
