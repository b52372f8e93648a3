//! Customer entity.

use chrono::{DateTime, Utc};
use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Email;

/// A registered customer.
///
/// Name and e-mail are mutable through explicit update operations only; the
/// creation timestamp is set once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: Email,
    created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer awaiting a persistence-assigned id.
    pub fn new(name: impl Into<String>, email: Email) -> Result<Self, DomainError> {
        let mut customer = Self {
            id: CustomerId::default(),
            name: String::new(),
            email,
            created_at: Utc::now(),
        };
        customer.set_name(name.into())?;
        Ok(customer)
    }

    /// Rebuilds a customer from previously persisted state.
    ///
    /// Field validation is skipped; the values were validated when first
    /// written.
    pub fn restore(
        id: CustomerId,
        name: String,
        email: Email,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the name after re-validation.
    pub fn update_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.set_name(name.into())
    }

    /// Replaces the e-mail address. The address was already validated by
    /// [`Email::new`], so this cannot fail.
    pub fn update_email(&mut self, email: Email) {
        self.email = email;
    }

    fn set_name(&mut self, name: String) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name cannot be empty"));
        }
        if name.chars().count() > 100 {
            return Err(DomainError::Validation("Name cannot exceed 100 characters"));
        }
        self.name = name;
        Ok(())
    }
}
