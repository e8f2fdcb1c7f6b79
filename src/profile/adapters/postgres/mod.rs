//! `PostgreSQL` adapters for profile persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresProfileRepository;
