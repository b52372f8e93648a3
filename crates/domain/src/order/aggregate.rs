//! Order aggregate root.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Money;

use super::{OrderItem, OrderStatus};

/// An order and the items it owns, treated as one consistency boundary.
///
/// The item collection is only reachable as a read-only slice; items change
/// through [`Order::add_item`] and [`Order::remove_item`], which the status
/// guards. The total is recomputed from the items on every call and is
/// never stored, so it cannot drift from the item set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a new pending order for a customer, with no items.
    pub fn new(customer_id: CustomerId) -> Result<Self, DomainError> {
        if customer_id.value() <= 0 {
            return Err(DomainError::Validation("CustomerId must be positive"));
        }
        let now = Utc::now();
        Ok(Self {
            id: OrderId::default(),
            customer_id,
            order_date: now,
            status: OrderStatus::Pending,
            created_at: now,
            items: Vec::new(),
        })
    }

    /// Rebuilds an order from previously persisted state, skipping
    /// validation.
    pub fn restore(
        id: OrderId,
        customer_id: CustomerId,
        order_date: DateTime<Utc>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            id,
            customer_id,
            order_date,
            status,
            created_at,
            items,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Read-only view of the owned items.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Sum of all current items' line totals, recomputed on every call.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(OrderItem::total_price).sum()
    }

    /// Adds a line item. Only pending orders can be modified.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        unit_price: Money,
    ) -> Result<(), DomainError> {
        if !self.status.can_modify_items() {
            return Err(DomainError::InvalidState("Cannot modify a non-pending order"));
        }
        let item = OrderItem::new(self.id, product_id, quantity, unit_price)?;
        self.items.push(item);
        Ok(())
    }

    /// Removes the first item for the given product. Removing an absent
    /// product is a no-op, not an error.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), DomainError> {
        if !self.status.can_modify_items() {
            return Err(DomainError::InvalidState("Cannot modify a non-pending order"));
        }
        if let Some(position) = self.items.iter().position(|i| i.product_id() == product_id) {
            self.items.remove(position);
        }
        Ok(())
    }

    /// Pending → Paid.
    pub fn mark_as_paid(&mut self) -> Result<(), DomainError> {
        if !self.status.can_pay() {
            return Err(DomainError::InvalidState("Only pending orders can be paid"));
        }
        self.status = OrderStatus::Paid;
        Ok(())
    }

    /// Paid → Shipped.
    pub fn ship(&mut self) -> Result<(), DomainError> {
        if !self.status.can_ship() {
            return Err(DomainError::InvalidState("Only paid orders can be shipped"));
        }
        self.status = OrderStatus::Shipped;
        Ok(())
    }

    /// Shipped → Delivered.
    pub fn deliver(&mut self) -> Result<(), DomainError> {
        if !self.status.can_deliver() {
            return Err(DomainError::InvalidState(
                "Only shipped orders can be delivered",
            ));
        }
        self.status = OrderStatus::Delivered;
        Ok(())
    }

    /// Any non-shipped, non-terminal status → Cancelled.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if !self.status.can_cancel() {
            return Err(DomainError::InvalidState(
                "Cannot cancel shipped or delivered orders",
            ));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}
