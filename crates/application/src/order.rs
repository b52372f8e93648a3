//! Order service.

use common::{CustomerId, OrderId, PagedResult};
use domain::{DomainError, Order, OrderItem};
use storage::{OrderItemRepository, OrderRepository};

use crate::dto::{CreateOrderRequest, OrderDto};
use crate::error::ServiceError;

/// Orchestrates order operations over an [`OrderRepository`] and an
/// [`OrderItemRepository`].
///
/// Orders have no generic update operation: status moves only through the
/// four transition methods, and items only through the item repository.
pub struct OrderService<O, I> {
    orders: O,
    items: I,
}

impl<O: OrderRepository, I: OrderItemRepository> OrderService<O, I> {
    /// Creates a new service over the given repositories.
    pub fn new(orders: O, items: I) -> Self {
        Self { orders, items }
    }

    /// Loads the order row alone; its item collection comes back empty.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<OrderDto>, ServiceError> {
        let order = self.orders.get_by_id(id).await?;
        Ok(order.as_ref().map(OrderDto::from))
    }

    /// Loads the order with its items eager-loaded.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderDto>, ServiceError> {
        let order = self.orders.get_by_id_with_items(id).await?;
        Ok(order.as_ref().map(OrderDto::from))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_customer_id(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderDto>, ServiceError> {
        let orders = self.orders.get_by_customer_id(customer_id).await?;
        Ok(orders.iter().map(OrderDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<OrderDto>, ServiceError> {
        let orders = self.orders.get_all().await?;
        Ok(orders.iter().map(OrderDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_paged(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<OrderDto>, ServiceError> {
        let page = self.orders.get_paged(page_number, page_size).await?;
        Ok(page.map(|order| OrderDto::from(&order)))
    }

    /// Creates the order, then persists each line item against the assigned
    /// order id.
    ///
    /// The two repositories are not spanned by a transaction: a failure
    /// while writing items leaves the already-written rows behind.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(&self, request: CreateOrderRequest) -> Result<OrderId, ServiceError> {
        let order = Order::new(request.customer_id)?;
        let order_id = self.orders.add(&order).await?;

        for item in &request.items {
            let item =
                OrderItem::new(order_id, item.product_id, item.quantity, item.unit_price)?;
            self.items.add(&item).await?;
        }

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(%order_id, item_count = request.items.len(), "order created");
        Ok(order_id)
    }

    /// Pending → Paid. Returns false if the id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn mark_as_paid(&self, id: OrderId) -> Result<bool, ServiceError> {
        self.transition(id, "paid", Order::mark_as_paid).await
    }

    /// Paid → Shipped. Returns false if the id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn ship(&self, id: OrderId) -> Result<bool, ServiceError> {
        self.transition(id, "shipped", Order::ship).await
    }

    /// Shipped → Delivered. Returns false if the id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn deliver(&self, id: OrderId) -> Result<bool, ServiceError> {
        self.transition(id, "delivered", Order::deliver).await
    }

    /// Cancels the order. Returns false if the id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<bool, ServiceError> {
        self.transition(id, "cancelled", Order::cancel).await
    }

    /// Deletes the order after cascading deletion of its items. Returns
    /// false if the order id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: OrderId) -> Result<bool, ServiceError> {
        self.items.delete_by_order_id(id).await?;
        Ok(self.orders.delete(id).await?)
    }

    /// Loads the aggregate, applies one state-machine operation, and
    /// persists the new status. State-machine rejections propagate to the
    /// caller; only an unknown id maps to `false`.
    async fn transition(
        &self,
        id: OrderId,
        label: &'static str,
        apply: impl FnOnce(&mut Order) -> Result<(), DomainError>,
    ) -> Result<bool, ServiceError> {
        let Some(mut order) = self.orders.get_by_id(id).await? else {
            return Ok(false);
        };
        apply(&mut order)?;
        let updated = self.orders.update(&order).await?;

        metrics::counter!("order_transitions_total", "transition" => label).increment(1);
        tracing::info!(%id, status = %order.status(), "order transitioned");
        Ok(updated)
    }
}
