//! Application layer for the order management system.
//!
//! Thin orchestration over the repository contracts: each service maps
//! request DTOs onto domain operations, persists the result, and maps
//! entities back onto response DTOs. Domain rules stay in the `domain`
//! crate; nothing here catches a [`domain::DomainError`] on a caller's
//! behalf.

pub mod customer;
pub mod dto;
pub mod error;
pub mod order;
pub mod product;

pub use customer::CustomerService;
pub use dto::{
    CreateCustomerRequest, CreateOrderItemRequest, CreateOrderRequest, CreateProductRequest,
    CustomerDto, OrderDto, OrderItemDto, ProductDto, UpdateCustomerRequest, UpdateProductRequest,
};
pub use error::ServiceError;
pub use order::OrderService;
pub use product::ProductService;
