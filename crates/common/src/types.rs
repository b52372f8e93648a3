use serde::{Deserialize, Serialize};

/// Declares an `i64`-backed identifier newtype.
///
/// Identities are surrogate keys assigned by the persistence layer. A
/// default-constructed id is `0`, meaning "not yet persisted"; real ids are
/// always positive.
macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying value.
            pub const fn value(self) -> i64 {
                self.0
            }

            /// Returns true once persistence has assigned a real identity.
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

id_type! {
    /// Identifier of a customer row.
    CustomerId
}

id_type! {
    /// Identifier of a product row.
    ProductId
}

id_type! {
    /// Identifier of an order row.
    OrderId
}

id_type! {
    /// Identifier of an order item row.
    OrderItemId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_id_is_unassigned() {
        assert_eq!(OrderId::default().value(), 0);
        assert!(!OrderId::default().is_assigned());
    }

    #[test]
    fn positive_id_is_assigned() {
        assert!(CustomerId::new(1).is_assigned());
        assert!(!CustomerId::new(0).is_assigned());
        assert!(!CustomerId::new(-5).is_assigned());
    }

    #[test]
    fn id_value_roundtrip() {
        let id = ProductId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(ProductId::from(42), id);
    }

    #[test]
    fn id_display() {
        assert_eq!(OrderItemId::new(7).to_string(), "7");
    }

    #[test]
    fn id_serializes_transparently() {
        let id = CustomerId::new(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
        let back: CustomerId = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
    }
}
