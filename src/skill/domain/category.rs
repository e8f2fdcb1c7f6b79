//! Skill categories.

use super::SkillDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a skill (and any task requested from it) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    /// Tutoring and lessons.
    Teaching,
    /// Household and mechanical repairs.
    Repairs,
    /// Cleaning and tidying.
    Cleaning,
    /// Care for children, elders, or pets.
    Caregiving,
    /// Anything else.
    Other,
}

impl SkillCategory {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Teaching,
        Self::Repairs,
        Self::Cleaning,
        Self::Caregiving,
        Self::Other,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teaching => "teaching",
            Self::Repairs => "repairs",
            Self::Cleaning => "cleaning",
            Self::Caregiving => "caregiving",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for SkillCategory {
    type Error = SkillDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| SkillDomainError::InvalidCategory(value.to_owned()))
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
