//! The failure taxonomy shared by every engine component.

use serde::{Deserialize, Serialize};

/// Classification of an engine failure.
///
/// Every per-component error maps onto exactly one kind via its `kind()`
/// method, so callers can route failures (display, abort, surface to the
/// user) without matching on component-specific variants. All kinds are
/// terminal: the engine never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced entity id does not exist.
    NotFound,
    /// Structurally invalid input, rejected before any write.
    InvalidArgument,
    /// Uniqueness violation (a name already in use).
    AlreadyExists,
    /// A debt or rebate use would exceed the available credit or rebate.
    InsufficientCredit,
    /// Illegal state transition (entity already in the requested state).
    AlreadyInState,
    /// Deletion blocked because dependent records exist.
    InUse,
}

impl ErrorKind {
    /// Returns the stable code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::InsufficientCredit => "INSUFFICIENT_CREDIT",
            Self::AlreadyInState => "ALREADY_IN_STATE",
            Self::InUse => "IN_USE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
