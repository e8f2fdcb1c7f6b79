//! Adapter implementations for skill persistence.

pub mod memory;
pub mod postgres;
