//! Error types for ledger arithmetic and parsing.

use crate::identity::UserId;
use thiserror::Error;

/// Errors returned while deriving ledger values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerDomainError {
    /// Summing the member's entries overflowed.
    #[error("balance overflow for user {0}")]
    Overflow(UserId),
}

/// Error returned while parsing transaction types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transaction type: {0}")]
pub struct ParseTransactionTypeError(pub String);
