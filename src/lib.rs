//! Timebank: community time-credit exchange.
//!
//! Members advertise skills, request help, accept and complete tasks, and
//! settle time-credits once the requester confirms the work. One credit is
//! one hour of service.
//!
//! # Architecture
//!
//! Timebank follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle state machine and settlement workflow
//! - [`ledger`]: Append-only credit ledger and derived balances
//! - [`skill`]: Skill offering and discovery
//! - [`profile`]: Member profiles and badges
//! - [`identity`]: Authenticated principals
//! - [`config`]: Runtime configuration

pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod persistence;
pub mod profile;
pub mod skill;
pub mod task;
