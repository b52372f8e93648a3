//! PostgreSQL implementations of the repository contracts.
//!
//! SQL is hand-written and each entity has its own explicit row→entity
//! mapping function; the domain crate never sees `sqlx`.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use common::{CustomerId, OrderId, OrderItemId, PagedResult, ProductId};
use domain::{Customer, Email, Money, Order, OrderItem, OrderStatus, Product};

use crate::repository::{
    CustomerRepository, OrderItemRepository, OrderRepository, ProductRepository,
};
use crate::{Result, StorageError};

/// Applies the SQL migrations under the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

fn row_to_customer(row: &PgRow) -> Result<Customer> {
    let email: String = row.try_get("email")?;
    let email =
        Email::new(email).map_err(|e| StorageError::corrupt("customers", e.message()))?;
    Ok(Customer::restore(
        CustomerId::new(row.try_get("id")?),
        row.try_get("name")?,
        email,
        row.try_get("created_at")?,
    ))
}

fn row_to_product(row: &PgRow) -> Result<Product> {
    Ok(Product::restore(
        ProductId::new(row.try_get("id")?),
        row.try_get("name")?,
        Money::from_cents(row.try_get("price_cents")?),
        row.try_get("created_at")?,
    ))
}

fn row_to_order(row: &PgRow, items: Vec<OrderItem>) -> Result<Order> {
    let code: i16 = row.try_get("status")?;
    let status = OrderStatus::from_code(code)
        .ok_or_else(|| StorageError::corrupt("orders", format!("unknown status code {code}")))?;
    Ok(Order::restore(
        OrderId::new(row.try_get("id")?),
        CustomerId::new(row.try_get("customer_id")?),
        row.try_get("order_date")?,
        status,
        row.try_get("created_at")?,
        items,
    ))
}

fn row_to_item(row: &PgRow) -> Result<OrderItem> {
    let quantity: i32 = row.try_get("quantity")?;
    let quantity = u32::try_from(quantity).map_err(|_| {
        StorageError::corrupt("order_items", format!("negative quantity {quantity}"))
    })?;
    Ok(OrderItem::restore(
        OrderItemId::new(row.try_get("id")?),
        OrderId::new(row.try_get("order_id")?),
        ProductId::new(row.try_get("product_id")?),
        quantity,
        Money::from_cents(row.try_get("unit_price_cents")?),
    ))
}

fn page_offset(page_number: u32, page_size: u32) -> i64 {
    i64::from(page_number.saturating_sub(1)) * i64::from(page_size)
}

/// PostgreSQL-backed customer repository.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM customers WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_customer).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let row =
            sqlx::query("SELECT id, name, email, created_at FROM customers WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.as_ref().map(row_to_customer).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query("SELECT id, name, email, created_at FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_customer).collect()
    }

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Customer>> {
        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query(
            "SELECT id, name, email, created_at FROM customers ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(page_size))
        .bind(page_offset(page_number, page_size))
        .fetch_all(&self.pool)
        .await?;
        let items = rows.iter().map(row_to_customer).collect::<Result<Vec<_>>>()?;
        Ok(PagedResult::new(
            items,
            page_number,
            page_size,
            total_count as u64,
        ))
    }

    async fn add(&self, customer: &Customer) -> Result<CustomerId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO customers (name, email, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(customer.name())
        .bind(customer.email().value())
        .bind(customer.created_at())
        .fetch_one(&self.pool)
        .await?;
        Ok(CustomerId::new(id))
    }

    async fn update(&self, customer: &Customer) -> Result<bool> {
        let result = sqlx::query("UPDATE customers SET name = $1, email = $2 WHERE id = $3")
            .bind(customer.name())
            .bind(customer.email().value())
            .bind(customer.id().value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row =
            sqlx::query("SELECT id, name, price_cents, created_at FROM products WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Product>> {
        let rows =
            sqlx::query("SELECT id, name, price_cents, created_at FROM products ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        rows.iter().map(row_to_product).collect()
    }

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Product>> {
        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query(
            "SELECT id, name, price_cents, created_at FROM products ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(page_size))
        .bind(page_offset(page_number, page_size))
        .fetch_all(&self.pool)
        .await?;
        let items = rows.iter().map(row_to_product).collect::<Result<Vec<_>>>()?;
        Ok(PagedResult::new(
            items,
            page_number,
            page_size,
            total_count as u64,
        ))
    }

    async fn add(&self, product: &Product) -> Result<ProductId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, price_cents, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(product.name())
        .bind(product.price().cents())
        .bind(product.created_at())
        .fetch_one(&self.pool)
        .await?;
        Ok(ProductId::new(id))
    }

    async fn update(&self, product: &Product) -> Result<bool> {
        let result = sqlx::query("UPDATE products SET name = $1, price_cents = $2 WHERE id = $3")
            .bind(product.name())
            .bind(product.price().cents())
            .bind(product.id().value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed order repository.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, customer_id, order_date, status, created_at FROM orders WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(|r| row_to_order(r, Vec::new())).transpose()
    }

    async fn get_by_id_with_items(&self, id: OrderId) -> Result<Option<Order>> {
        let Some(row) = sqlx::query(
            "SELECT id, customer_id, order_date, status, created_at FROM orders WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let item_rows = sqlx::query(
            "SELECT id, order_id, product_id, quantity, unit_price_cents
             FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;
        let items = item_rows.iter().map(row_to_item).collect::<Result<Vec<_>>>()?;

        Ok(Some(row_to_order(&row, items)?))
    }

    async fn get_by_customer_id(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, customer_id, order_date, status, created_at FROM orders
             WHERE customer_id = $1 ORDER BY order_date DESC, id DESC",
        )
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|r| row_to_order(r, Vec::new())).collect()
    }

    async fn get_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, customer_id, order_date, status, created_at FROM orders
             ORDER BY order_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(|r| row_to_order(r, Vec::new())).collect()
    }

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Order>> {
        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query(
            "SELECT id, customer_id, order_date, status, created_at FROM orders
             ORDER BY order_date DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(page_size))
        .bind(page_offset(page_number, page_size))
        .fetch_all(&self.pool)
        .await?;
        let items = rows
            .iter()
            .map(|r| row_to_order(r, Vec::new()))
            .collect::<Result<Vec<_>>>()?;
        Ok(PagedResult::new(
            items,
            page_number,
            page_size,
            total_count as u64,
        ))
    }

    async fn get_paged_by_customer_id(
        &self,
        customer_id: CustomerId,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<Order>> {
        let total_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
                .bind(customer_id.value())
                .fetch_one(&self.pool)
                .await?;
        let rows = sqlx::query(
            "SELECT id, customer_id, order_date, status, created_at FROM orders
             WHERE customer_id = $1 ORDER BY order_date DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(customer_id.value())
        .bind(i64::from(page_size))
        .bind(page_offset(page_number, page_size))
        .fetch_all(&self.pool)
        .await?;
        let items = rows
            .iter()
            .map(|r| row_to_order(r, Vec::new()))
            .collect::<Result<Vec<_>>>()?;
        Ok(PagedResult::new(
            items,
            page_number,
            page_size,
            total_count as u64,
        ))
    }

    async fn add(&self, order: &Order) -> Result<OrderId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (customer_id, order_date, status, created_at)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(order.customer_id().value())
        .bind(order.order_date())
        .bind(order.status().code())
        .bind(order.created_at())
        .fetch_one(&self.pool)
        .await?;
        Ok(OrderId::new(id))
    }

    async fn update(&self, order: &Order) -> Result<bool> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(order.status().code())
            .bind(order.id().value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed order item repository.
#[derive(Clone)]
pub struct PgOrderItemRepository {
    pool: PgPool,
}

impl PgOrderItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderItemRepository for PgOrderItemRepository {
    async fn get_by_id(&self, id: OrderItemId) -> Result<Option<OrderItem>> {
        let row = sqlx::query(
            "SELECT id, order_id, product_id, quantity, unit_price_cents
             FROM order_items WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_item).transpose()
    }

    async fn get_by_order_id(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            "SELECT id, order_id, product_id, quantity, unit_price_cents
             FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id.value())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_item).collect()
    }

    async fn add(&self, item: &OrderItem) -> Result<OrderItemId> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(item.order_id().value())
        .bind(item.product_id().value())
        .bind(item.quantity() as i32)
        .bind(item.unit_price().cents())
        .fetch_one(&self.pool)
        .await?;
        Ok(OrderItemId::new(id))
    }

    async fn update(&self, item: &OrderItem) -> Result<bool> {
        let result =
            sqlx::query("UPDATE order_items SET quantity = $1, unit_price_cents = $2 WHERE id = $3")
                .bind(item.quantity() as i32)
                .bind(item.unit_price().cents())
                .bind(item.id().value())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: OrderItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_order_id(&self, order_id: OrderId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
