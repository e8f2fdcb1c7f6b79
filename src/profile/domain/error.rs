//! Error types for profile validation.

use thiserror::Error;

/// Errors returned while editing profiles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,
}
