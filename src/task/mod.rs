//! Help requests and their settlement.
//!
//! A requester opens a task worth some credits, another member accepts and
//! completes it, and the requester confirms. Completion credits the provider
//! and confirmation debits the requester, each in one atomic write that also
//! appends to the [`crate::ledger`]. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
