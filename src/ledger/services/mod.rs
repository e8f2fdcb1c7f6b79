//! Application services for balances and statements.

mod balance;

pub use balance::{LedgerService, LedgerServiceError, LedgerServiceResult};
