//! Recognition badges.

use crate::identity::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an awarded badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(Uuid);

impl BadgeId {
    /// Creates a new random badge identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a badge identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for BadgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of recognition.
///
/// Unknown stored values are kept verbatim so new badge kinds do not break
/// reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeType {
    /// Helped many members.
    Helper,
    /// Skills in high demand.
    Popular,
    /// Consistently confirmed work.
    Trusted,
    /// Active over a long period.
    Consistent,
    /// Any other kind.
    Other(String),
}

impl BadgeType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Helper => "helper",
            Self::Popular => "popular",
            Self::Trusted => "trusted",
            Self::Consistent => "consistent",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for BadgeType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "helper" => Self::Helper,
            "popular" => Self::Popular,
            "trusted" => Self::Trusted,
            "consistent" => Self::Consistent,
            _ => Self::Other(value.to_owned()),
        }
    }
}

impl fmt::Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A badge awarded to a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    id: BadgeId,
    user_id: UserId,
    badge_type: BadgeType,
    badge_name: String,
    earned_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBadgeData {
    /// Persisted badge identifier.
    pub id: BadgeId,
    /// Member holding the badge.
    pub user_id: UserId,
    /// Kind of recognition.
    pub badge_type: BadgeType,
    /// Display name.
    pub badge_name: String,
    /// Award timestamp.
    pub earned_at: DateTime<Utc>,
}

impl Badge {
    /// Reconstructs a badge from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBadgeData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            badge_type: data.badge_type,
            badge_name: data.badge_name,
            earned_at: data.earned_at,
        }
    }

    /// Returns the badge identifier.
    #[must_use]
    pub const fn id(&self) -> BadgeId {
        self.id
    }

    /// Returns the holder.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the kind of recognition.
    #[must_use]
    pub const fn badge_type(&self) -> &BadgeType {
        &self.badge_type
    }

    /// Returns the display name.
    #[must_use]
    pub fn badge_name(&self) -> &str {
        &self.badge_name
    }

    /// Returns the award timestamp.
    #[must_use]
    pub const fn earned_at(&self) -> DateTime<Utc> {
        self.earned_at
    }
}
