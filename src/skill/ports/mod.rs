//! Port contracts for skill persistence.

pub mod repository;

pub use repository::{SkillQuery, SkillRepository, SkillRepositoryError, SkillRepositoryResult};
