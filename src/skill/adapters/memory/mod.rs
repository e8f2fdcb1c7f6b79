//! In-memory adapters for skill persistence.

mod skill;

pub use skill::InMemorySkillRepository;
