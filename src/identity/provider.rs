//! Identity port and the session-backed adapter.

use super::UserId;
use thiserror::Error;

/// Errors returned while resolving the current principal.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No principal is attached to the request.
    #[error("authentication required")]
    Unauthenticated,
}

/// Supplies the principal on whose behalf an operation runs.
pub trait IdentityProvider: Send + Sync {
    /// Returns the authenticated principal, if any.
    fn current_principal(&self) -> Option<UserId>;

    /// Returns the authenticated principal or fails.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when no principal is
    /// available.
    fn require_principal(&self) -> Result<UserId, IdentityError> {
        self.current_principal()
            .ok_or(IdentityError::Unauthenticated)
    }
}

/// Identity resolved once per request from the caller's session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    principal: Option<UserId>,
}

impl SessionIdentity {
    /// Creates an identity for an authenticated member.
    #[must_use]
    pub const fn authenticated(user_id: UserId) -> Self {
        Self {
            principal: Some(user_id),
        }
    }

    /// Creates an identity with no principal.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { principal: None }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_principal(&self) -> Option<UserId> {
        self.principal
    }
}
