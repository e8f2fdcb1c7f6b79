//! Domain model for profiles and badges.

mod badge;
mod error;
mod profile;

pub use badge::{Badge, BadgeId, BadgeType, PersistedBadgeData};
pub use error::ProfileDomainError;
pub use profile::{DEFAULT_DISPLAY_NAME, PersistedProfileData, Profile};
