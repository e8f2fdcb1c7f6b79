//! `PostgreSQL` adapters for task lifecycle persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresTaskRepository;
