//! Balances derived from ledger entries.

use super::{CreditEntry, LedgerDomainError};
use crate::identity::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A member's credit balance. May be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(i64);

impl Balance {
    /// Sums the entries belonging to `user`, ignoring everyone else's.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::Overflow`] if the sum does not fit in
    /// an `i64`.
    pub fn from_entries<'a>(
        user: UserId,
        entries: impl IntoIterator<Item = &'a CreditEntry>,
    ) -> Result<Self, LedgerDomainError> {
        entries
            .into_iter()
            .filter(|entry| entry.user_id() == user)
            .try_fold(0_i64, |total, entry| total.checked_add(entry.amount()))
            .map(Self)
            .ok_or(LedgerDomainError::Overflow(user))
    }

    /// Returns the balance in credits.
    #[must_use]
    pub const fn credits(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
