//! Domain layer for the order management system.
//!
//! This crate provides the core business model:
//! - `Email` and `Money` value objects
//! - `Customer` and `Product` entities with validated mutation
//! - The `Order` aggregate owning its `OrderItem`s, with a status state
//!   machine guarding every transition and item mutation
//!
//! All operations here are synchronous pure computation; persistence lives
//! behind the repository contracts in the `storage` crate.

pub mod customer;
pub mod error;
pub mod order;
pub mod product;
pub mod value_objects;

pub use common::{CustomerId, OrderId, OrderItemId, ProductId};
pub use customer::Customer;
pub use error::DomainError;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use value_objects::{Email, Money};
