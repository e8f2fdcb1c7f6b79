//! Domain model for credit entries and derived balances.

mod balance;
mod entry;
mod error;

pub use balance::Balance;
pub use entry::{CreditEntry, EntryId, PersistedCreditEntryData, TransactionType};
pub use error::{LedgerDomainError, ParseTransactionTypeError};
