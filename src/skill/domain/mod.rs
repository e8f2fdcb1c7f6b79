//! Domain model for offered skills.

mod category;
mod error;
mod skill;

pub use category::SkillCategory;
pub use error::SkillDomainError;
pub use skill::{PersistedSkillData, Skill, SkillId, SkillName};
