//! In-memory implementation of the repository contracts.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use common::{CustomerId, OrderId, OrderItemId, PagedResult, ProductId};
use domain::{Customer, Order, OrderItem, OrderStatus, Product};

use crate::Result;
use crate::repository::{
    CustomerRepository, OrderItemRepository, OrderRepository, ProductRepository,
};

/// An order row without its items; items live in their own table, exactly
/// as they do in the SQL schema.
#[derive(Debug, Clone)]
struct OrderRecord {
    customer_id: CustomerId,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

/// In-memory database implementing every repository contract.
///
/// Tables are `BTreeMap`s keyed by id (so listings come back in id order)
/// behind `RwLock`s, with one id sequence per table. Cloning the store
/// clones handles to the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    customers: Arc<RwLock<BTreeMap<i64, Customer>>>,
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    orders: Arc<RwLock<BTreeMap<i64, OrderRecord>>>,
    order_items: Arc<RwLock<BTreeMap<i64, OrderItem>>>,
    customer_seq: Arc<AtomicI64>,
    product_seq: Arc<AtomicI64>,
    order_seq: Arc<AtomicI64>,
    order_item_seq: Arc<AtomicI64>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every table and resets the id sequences.
    pub async fn clear(&self) {
        self.customers.write().await.clear();
        self.products.write().await.clear();
        self.orders.write().await.clear();
        self.order_items.write().await.clear();
        self.customer_seq.store(0, Ordering::SeqCst);
        self.product_seq.store(0, Ordering::SeqCst);
        self.order_seq.store(0, Ordering::SeqCst);
        self.order_item_seq.store(0, Ordering::SeqCst);
    }

    fn next_id(seq: &AtomicI64) -> i64 {
        seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn record_to_order(id: i64, record: &OrderRecord, items: Vec<OrderItem>) -> Order {
        Order::restore(
            OrderId::new(id),
            record.customer_id,
            record.order_date,
            record.status,
            record.created_at,
            items,
        )
    }

    fn items_for_order(items: &BTreeMap<i64, OrderItem>, order_id: OrderId) -> Vec<OrderItem> {
        items
            .values()
            .filter(|item| item.order_id() == order_id)
            .cloned()
            .collect()
    }

    /// Orders sorted newest-first, matching the SQL listing order.
    fn orders_newest_first(orders: &BTreeMap<i64, OrderRecord>) -> Vec<(i64, OrderRecord)> {
        let mut rows: Vec<_> = orders
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect();
        rows.sort_by(|a, b| b.1.order_date.cmp(&a.1.order_date).then(b.0.cmp(&a.0)));
        rows
    }

    fn page<T>(rows: Vec<T>, page_number: u32, page_size: u32) -> PagedResult<T> {
        let total_count = rows.len() as u64;
        let offset = page_number.saturating_sub(1) as usize * page_size as usize;
        let items = rows
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();
        PagedResult::new(items, page_number, page_size, total_count)
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(&id.value()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|customer| customer.email().value() == email)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.read().await.values().cloned().collect())
    }

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Customer>> {
        let rows: Vec<_> = self.customers.read().await.values().cloned().collect();
        Ok(Self::page(rows, page_number, page_size))
    }

    async fn add(&self, customer: &Customer) -> Result<CustomerId> {
        let id = CustomerId::new(Self::next_id(&self.customer_seq));
        let stored = Customer::restore(
            id,
            customer.name().to_string(),
            customer.email().clone(),
            customer.created_at(),
        );
        self.customers.write().await.insert(id.value(), stored);
        Ok(id)
    }

    async fn update(&self, customer: &Customer) -> Result<bool> {
        let mut customers = self.customers.write().await;
        match customers.get_mut(&customer.id().value()) {
            Some(existing) => {
                *existing = Customer::restore(
                    customer.id(),
                    customer.name().to_string(),
                    customer.email().clone(),
                    existing.created_at(),
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CustomerId) -> Result<bool> {
        Ok(self.customers.write().await.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(&id.value()).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Product>> {
        let rows: Vec<_> = self.products.read().await.values().cloned().collect();
        Ok(Self::page(rows, page_number, page_size))
    }

    async fn add(&self, product: &Product) -> Result<ProductId> {
        let id = ProductId::new(Self::next_id(&self.product_seq));
        let stored = Product::restore(
            id,
            product.name().to_string(),
            product.price(),
            product.created_at(),
        );
        self.products.write().await.insert(id.value(), stored);
        Ok(id)
    }

    async fn update(&self, product: &Product) -> Result<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id().value()) {
            Some(existing) => {
                *existing = Product::restore(
                    product.id(),
                    product.name().to_string(),
                    product.price(),
                    existing.created_at(),
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        Ok(self.products.write().await.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .get(&id.value())
            .map(|record| Self::record_to_order(id.value(), record, Vec::new())))
    }

    async fn get_by_id_with_items(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        let Some(record) = orders.get(&id.value()) else {
            return Ok(None);
        };
        let items = Self::items_for_order(&*self.order_items.read().await, id);
        Ok(Some(Self::record_to_order(id.value(), record, items)))
    }

    async fn get_by_customer_id(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(Self::orders_newest_first(&orders)
            .into_iter()
            .filter(|(_, record)| record.customer_id == customer_id)
            .map(|(id, record)| Self::record_to_order(id, &record, Vec::new()))
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(Self::orders_newest_first(&orders)
            .into_iter()
            .map(|(id, record)| Self::record_to_order(id, &record, Vec::new()))
            .collect())
    }

    async fn get_paged(&self, page_number: u32, page_size: u32) -> Result<PagedResult<Order>> {
        let rows = OrderRepository::get_all(self).await?;
        Ok(Self::page(rows, page_number, page_size))
    }

    async fn get_paged_by_customer_id(
        &self,
        customer_id: CustomerId,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<Order>> {
        let rows = self.get_by_customer_id(customer_id).await?;
        Ok(Self::page(rows, page_number, page_size))
    }

    async fn add(&self, order: &Order) -> Result<OrderId> {
        let id = OrderId::new(Self::next_id(&self.order_seq));
        let record = OrderRecord {
            customer_id: order.customer_id(),
            order_date: order.order_date(),
            status: order.status(),
            created_at: order.created_at(),
        };
        self.orders.write().await.insert(id.value(), record);
        Ok(id)
    }

    async fn update(&self, order: &Order) -> Result<bool> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id().value()) {
            Some(record) => {
                record.status = order.status();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        Ok(self.orders.write().await.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl OrderItemRepository for InMemoryStore {
    async fn get_by_id(&self, id: OrderItemId) -> Result<Option<OrderItem>> {
        Ok(self.order_items.read().await.get(&id.value()).cloned())
    }

    async fn get_by_order_id(&self, order_id: OrderId) -> Result<Vec<OrderItem>> {
        Ok(Self::items_for_order(
            &*self.order_items.read().await,
            order_id,
        ))
    }

    async fn add(&self, item: &OrderItem) -> Result<OrderItemId> {
        let id = OrderItemId::new(Self::next_id(&self.order_item_seq));
        let stored = OrderItem::restore(
            id,
            item.order_id(),
            item.product_id(),
            item.quantity(),
            item.unit_price(),
        );
        self.order_items.write().await.insert(id.value(), stored);
        Ok(id)
    }

    async fn update(&self, item: &OrderItem) -> Result<bool> {
        let mut items = self.order_items.write().await;
        match items.get_mut(&item.id().value()) {
            Some(existing) => {
                *existing = OrderItem::restore(
                    existing.id(),
                    existing.order_id(),
                    existing.product_id(),
                    item.quantity(),
                    item.unit_price(),
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: OrderItemId) -> Result<bool> {
        Ok(self.order_items.write().await.remove(&id.value()).is_some())
    }

    async fn delete_by_order_id(&self, order_id: OrderId) -> Result<bool> {
        let mut items = self.order_items.write().await;
        let before = items.len();
        items.retain(|_, item| item.order_id() != order_id);
        Ok(items.len() < before)
    }
}
