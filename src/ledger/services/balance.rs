//! Service layer for balance and statement queries.

use crate::error::ErrorKind;
use crate::identity::{IdentityError, IdentityProvider, UserId};
use crate::ledger::{
    domain::{Balance, CreditEntry, LedgerDomainError},
    ports::{LedgerRepository, LedgerRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for ledger queries.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// No authenticated principal.
    #[error(transparent)]
    Authentication(#[from] IdentityError),
    /// Balance arithmetic failed.
    #[error(transparent)]
    Domain(#[from] LedgerDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] LedgerRepositoryError),
}

impl LedgerServiceError {
    /// Classifies the error for user-facing reporting.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Domain(_) | Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

/// Result type for ledger service operations.
pub type LedgerServiceResult<T> = Result<T, LedgerServiceError>;

/// Balance and statement queries over the append-only ledger.
#[derive(Clone)]
pub struct LedgerService<L>
where
    L: LedgerRepository,
{
    repository: Arc<L>,
}

impl<L> LedgerService<L>
where
    L: LedgerRepository,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Re-aggregates `user`'s balance from their entries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Repository`] when the read fails and
    /// [`LedgerServiceError::Domain`] on overflow.
    pub async fn balance(&self, user: UserId) -> LedgerServiceResult<Balance> {
        let entries = self.repository.entries_for_user(user).await?;
        let balance = Balance::from_entries(user, &entries)?;
        debug!(user_id = %user, balance = balance.credits(), entries = entries.len(), "balance computed");
        Ok(balance)
    }

    /// Returns the caller's balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Authentication`] without a principal,
    /// otherwise as [`Self::balance`].
    pub async fn my_balance(&self, identity: &impl IdentityProvider) -> LedgerServiceResult<Balance> {
        let user = identity.require_principal()?;
        self.balance(user).await
    }

    /// Returns the caller's entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Authentication`] without a principal
    /// and [`LedgerServiceError::Repository`] when the read fails.
    pub async fn statement(
        &self,
        identity: &impl IdentityProvider,
    ) -> LedgerServiceResult<Vec<CreditEntry>> {
        let user = identity.require_principal()?;
        Ok(self.repository.entries_for_user(user).await?)
    }
}
