//! Authenticated principals and the identity port.
//!
//! Every guarded operation asks an [`IdentityProvider`] for the current
//! principal. A missing principal is reported as
//! [`IdentityError::Unauthenticated`] and the operation never proceeds
//! anonymously.

mod principal;
mod provider;

pub use principal::UserId;
pub use provider::{IdentityError, IdentityProvider, SessionIdentity};
