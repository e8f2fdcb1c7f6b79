//! Error classification shared by every service.

use std::fmt;

/// Coarse classification of service failures.
///
/// Every service error maps onto exactly one kind so callers can choose a
/// user-facing message without matching on context-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was malformed or violated a policy (for example self-dealing).
    Validation,
    /// No authenticated principal was available.
    Authentication,
    /// The principal is not allowed to perform the action.
    Authorization,
    /// The action is not valid from the current lifecycle state.
    State,
    /// A concurrent write claimed the record first.
    Conflict,
    /// The referenced record does not exist.
    NotFound,
    /// The persistence collaborator failed.
    Persistence,
}

impl ErrorKind {
    /// Returns the canonical lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::State => "state",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
