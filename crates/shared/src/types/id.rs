//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `WalletId` where a
//! `CreditCardId` is expected. IDs are UUID v7 (time-ordered), so ordered
//! collections iterate entities roughly in creation order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(WalletId, "Unique identifier for a wallet.");
typed_id!(TransactionId, "Unique identifier for a wallet transaction.");
typed_id!(TransferId, "Unique identifier for a wallet-to-wallet transfer.");
typed_id!(CategoryId, "Unique identifier for a category.");
typed_id!(
    RecurringTransactionId,
    "Unique identifier for a recurring transaction."
);
typed_id!(CreditCardId, "Unique identifier for a credit card.");
typed_id!(DebtId, "Unique identifier for a credit card debt.");
typed_id!(PaymentId, "Unique identifier for a credit card payment.");
typed_id!(CreditId, "Unique identifier for a credit card credit.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(WalletId::new(), WalletId::new());
    }

    #[test]
    fn test_display_round_trips() {
        let id = CreditCardId::new();
        let parsed = CreditCardId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let first = TransactionId::new();
        let second = TransactionId::new();
        assert!(first <= second);
    }
}
