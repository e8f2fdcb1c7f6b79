//! Error types for skill validation.

use thiserror::Error;

/// Errors returned while constructing skill values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkillDomainError {
    /// The skill name is empty after trimming.
    #[error("skill name must not be empty")]
    EmptyName,

    /// The category is not one of the supported values.
    #[error("unknown skill category: {0}")]
    InvalidCategory(String),
}
