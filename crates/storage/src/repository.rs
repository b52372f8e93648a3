//! Repository trait contracts consumed by the application services.
//!
//! Absence is never an error here: point lookups return `Option`, and
//! `update`/`delete` report whether the row existed. Page numbers are
//! 1-based throughout.

use async_trait::async_trait;
use common::{CustomerId, OrderId, OrderItemId, PagedResult, ProductId};
use domain::{Customer, Order, OrderItem, Product};

use crate::Result;

/// Persistence contract for customers.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Looks a customer up by exact e-mail address.
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>>;

    async fn get_all(&self) -> Result<Vec<Customer>>;

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Customer>>;

    /// Inserts the customer and returns its newly assigned id.
    async fn add(&self, customer: &Customer) -> Result<CustomerId>;

    /// Persists name and e-mail. Returns false if the row does not exist.
    async fn update(&self, customer: &Customer) -> Result<bool>;

    /// Returns false if the row does not exist.
    async fn delete(&self, id: CustomerId) -> Result<bool>;
}

/// Persistence contract for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    async fn get_all(&self) -> Result<Vec<Product>>;

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Product>>;

    /// Inserts the product and returns its newly assigned id.
    async fn add(&self, product: &Product) -> Result<ProductId>;

    /// Persists name and price. Returns false if the row does not exist.
    async fn update(&self, product: &Product) -> Result<bool>;

    async fn delete(&self, id: ProductId) -> Result<bool>;
}

/// Persistence contract for orders.
///
/// `get_by_id` returns the order row alone (empty item collection);
/// `get_by_id_with_items` eager-loads the items. Listings are ordered by
/// order date, newest first.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    async fn get_by_id_with_items(&self, id: OrderId) -> Result<Option<Order>>;

    async fn get_by_customer_id(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    async fn get_all(&self) -> Result<Vec<Order>>;

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Order>>;

    async fn get_paged_by_customer_id(
        &self,
        customer_id: CustomerId,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<Order>>;

    /// Inserts the order row (items are persisted separately through
    /// [`OrderItemRepository`]) and returns its newly assigned id.
    async fn add(&self, order: &Order) -> Result<OrderId>;

    /// Persists the status, the only mutable order column. Returns false if
    /// the row does not exist.
    async fn update(&self, order: &Order) -> Result<bool>;

    async fn delete(&self, id: OrderId) -> Result<bool>;
}

/// Persistence contract for order line items.
#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    async fn get_by_id(&self, id: OrderItemId) -> Result<Option<OrderItem>>;

    async fn get_by_order_id(&self, order_id: OrderId) -> Result<Vec<OrderItem>>;

    /// Inserts the item and returns its newly assigned id.
    async fn add(&self, item: &OrderItem) -> Result<OrderItemId>;

    /// Persists quantity and unit price. Returns false if the row does not
    /// exist.
    async fn update(&self, item: &OrderItem) -> Result<bool>;

    async fn delete(&self, id: OrderItemId) -> Result<bool>;

    /// Removes every item belonging to the order; used by the cascade on
    /// order deletion. Returns false if no rows matched.
    async fn delete_by_order_id(&self, order_id: OrderId) -> Result<bool>;
}
