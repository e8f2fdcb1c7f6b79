//! Append-only credit ledger.
//!
//! Entries are written only by the task lifecycle when a task is completed
//! or a completion is confirmed. Balances are never stored; every query
//! re-aggregates the member's entries.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
