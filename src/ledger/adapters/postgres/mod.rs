//! `PostgreSQL` adapters for ledger reads.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresLedgerRepository;
