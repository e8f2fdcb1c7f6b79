//! Adapter implementations for ledger reads.

pub mod memory;
pub mod postgres;
