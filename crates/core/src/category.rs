//! Category entity referenced by transactions and debts.
//!
//! The engine never interprets categories; it only verifies they exist
//! before attaching a reference. Management of the category tree belongs to
//! the caller.

use saldo_shared::types::CategoryId;
use serde::{Deserialize, Serialize};

/// A spending/income category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Whether the category is archived (hidden from pickers, kept on
    /// historical rows).
    pub archived: bool,
}

impl Category {
    /// Creates an active category with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            archived: false,
        }
    }
}
