//! Member profiles and badges.
//!
//! Profiles are created by the identity service at signup and edited only
//! by their owner. Badges are awarded outside this crate and are read-only
//! here.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
