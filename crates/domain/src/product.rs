//! Product entity.

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Money;

/// A sellable product with a strictly positive price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product awaiting a persistence-assigned id.
    pub fn new(name: impl Into<String>, price: Money) -> Result<Self, DomainError> {
        let mut product = Self {
            id: ProductId::default(),
            name: String::new(),
            price: Money::zero(),
            created_at: Utc::now(),
        };
        product.set_name(name.into())?;
        product.set_price(price)?;
        Ok(product)
    }

    /// Rebuilds a product from previously persisted state, skipping
    /// validation.
    pub fn restore(id: ProductId, name: String, price: Money, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            price,
            created_at,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the name after re-validation.
    pub fn update_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.set_name(name.into())
    }

    /// Replaces the price after re-validation.
    pub fn update_price(&mut self, price: Money) -> Result<(), DomainError> {
        self.set_price(price)
    }

    fn set_name(&mut self, name: String) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name cannot be empty"));
        }
        if name.chars().count() > 200 {
            return Err(DomainError::Validation("Name cannot exceed 200 characters"));
        }
        self.name = name;
        Ok(())
    }

    fn set_price(&mut self, price: Money) -> Result<(), DomainError> {
        if !price.is_positive() {
            return Err(DomainError::Validation("Price must be positive"));
        }
        self.price = price;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_product_roundtrips() {
        let product = Product::new("Widget", Money::from_cents(1999)).unwrap();
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price().cents(), 1999);
        assert!(!product.id().is_assigned());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Product::new("  ", Money::from_cents(100)).unwrap_err();
        assert_eq!(err, DomainError::Validation("Name cannot be empty"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let err = Product::new("x".repeat(201), Money::from_cents(100)).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("Name cannot exceed 200 characters")
        );
    }

    #[test]
    fn name_at_limit_is_accepted() {
        assert!(Product::new("x".repeat(200), Money::from_cents(100)).is_ok());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        for cents in [0, -500] {
            let err = Product::new("Widget", Money::from_cents(cents)).unwrap_err();
            assert_eq!(err, DomainError::Validation("Price must be positive"));
        }
    }

    #[test]
    fn updates_roundtrip_new_values() {
        let mut product = Product::new("Widget", Money::from_cents(100)).unwrap();
        product.update_name("Gadget").unwrap();
        product.update_price(Money::from_cents(250)).unwrap();
        assert_eq!(product.name(), "Gadget");
        assert_eq!(product.price().cents(), 250);
    }

    #[test]
    fn failed_update_leaves_product_unchanged() {
        let mut product = Product::new("Widget", Money::from_cents(100)).unwrap();
        assert!(product.update_price(Money::zero()).is_err());
        assert_eq!(product.price().cents(), 100);
    }
}
