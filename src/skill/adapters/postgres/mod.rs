//! `PostgreSQL` adapters for skill persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresSkillRepository;
