//! Port contracts for ledger reads.

pub mod repository;

#[cfg(test)]
pub use repository::MockLedgerRepository;
pub use repository::{LedgerRepository, LedgerRepositoryError, LedgerRepositoryResult};
