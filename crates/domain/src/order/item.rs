//! Order line item.

use common::{OrderId, OrderItemId, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Money;

/// One line of an order: a product, a quantity, and the unit price captured
/// at ordering time.
///
/// The owning order id may be `0` while the parent order has not been
/// persisted yet; it can never be negative. The unit price is immutable
/// after construction; only the quantity can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    quantity: u32,
    unit_price: Money,
}

impl OrderItem {
    /// Creates a new line item awaiting a persistence-assigned id.
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, DomainError> {
        if order_id.value() < 0 {
            return Err(DomainError::Validation("OrderId cannot be negative"));
        }
        if product_id.value() <= 0 {
            return Err(DomainError::Validation("ProductId must be positive"));
        }
        if quantity == 0 {
            return Err(DomainError::Validation("Quantity must be positive"));
        }
        if !unit_price.is_positive() {
            return Err(DomainError::Validation("UnitPrice must be positive"));
        }
        Ok(Self {
            id: OrderItemId::default(),
            order_id,
            product_id,
            quantity,
            unit_price,
        })
    }

    /// Rebuilds an item from previously persisted state, skipping
    /// validation.
    pub fn restore(
        id: OrderItemId,
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            id,
            order_id,
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn id(&self) -> OrderItemId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Replaces the quantity after re-validation.
    pub fn update_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::Validation("Quantity must be positive"));
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Derived line total: `quantity × unit_price`, recomputed on every
    /// read.
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> OrderItem {
        OrderItem::new(
            OrderId::new(1),
            ProductId::new(1),
            3,
            Money::from_dollars(50),
        )
        .unwrap()
    }

    #[test]
    fn total_price_is_exact() {
        assert_eq!(item().total_price(), Money::from_dollars(150));
        assert_eq!(item().total_price().cents(), 15_000);
    }

    #[test]
    fn unpersisted_parent_order_is_allowed() {
        let item = OrderItem::new(
            OrderId::new(0),
            ProductId::new(1),
            1,
            Money::from_cents(100),
        );
        assert!(item.is_ok());
    }

    #[test]
    fn negative_order_id_is_rejected() {
        let err = OrderItem::new(
            OrderId::new(-1),
            ProductId::new(1),
            1,
            Money::from_cents(100),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::Validation("OrderId cannot be negative"));
    }

    #[test]
    fn non_positive_product_id_is_rejected() {
        for raw in [0, -3] {
            let err = OrderItem::new(
                OrderId::new(1),
                ProductId::new(raw),
                1,
                Money::from_cents(100),
            )
            .unwrap_err();
            assert_eq!(err, DomainError::Validation("ProductId must be positive"));
        }
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err =
            OrderItem::new(OrderId::new(1), ProductId::new(1), 0, Money::from_cents(100))
                .unwrap_err();
        assert_eq!(err, DomainError::Validation("Quantity must be positive"));
    }

    #[test]
    fn non_positive_unit_price_is_rejected() {
        for cents in [0, -100] {
            let err = OrderItem::new(
                OrderId::new(1),
                ProductId::new(1),
                1,
                Money::from_cents(cents),
            )
            .unwrap_err();
            assert_eq!(err, DomainError::Validation("UnitPrice must be positive"));
        }
    }

    #[test]
    fn update_quantity_revalidates() {
        let mut item = item();
        item.update_quantity(5).unwrap();
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.total_price(), Money::from_dollars(250));

        assert!(item.update_quantity(0).is_err());
        assert_eq!(item.quantity(), 5);
    }
}
