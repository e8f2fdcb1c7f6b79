//! Skill offering and discovery.
//!
//! Members advertise what they can help with; other members search the
//! catalogue and turn a skill into a help request. The module follows the
//! same hexagonal split as [`crate::task`]:
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
