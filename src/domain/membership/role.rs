//! Club role hierarchy.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};

/// Role held by an approved member within a club.
///
/// Exactly one member per club is the `Leader`: the founder. The leader role
/// is never granted, revoked or transferred by the membership engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClubRole {
    /// Club founder. Singular and immutable.
    Leader,

    /// Staff member who can moderate the roster.
    Manager,

    /// Regular member.
    Member,
}

impl ClubRole {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Leader => "LEADER",
            ClubRole::Manager => "MANAGER",
            ClubRole::Member => "MEMBER",
        }
    }

    /// Human readable name used in notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            ClubRole::Leader => "leader",
            ClubRole::Manager => "manager",
            ClubRole::Member => "member",
        }
    }

    /// Returns true for roles allowed to moderate the roster.
    pub fn is_staff(&self) -> bool {
        matches!(self, ClubRole::Leader | ClubRole::Manager)
    }

    /// Returns true for roles that may be granted through a role change.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, ClubRole::Leader)
    }

    /// Sort rank for roster listings. Lower ranks list first.
    pub fn rank(&self) -> u8 {
        match self {
            ClubRole::Leader => 0,
            ClubRole::Manager => 1,
            ClubRole::Member => 2,
        }
    }
}

impl fmt::Display for ClubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClubRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LEADER" => Ok(ClubRole::Leader),
            "MANAGER" => Ok(ClubRole::Manager),
            "MEMBER" => Ok(ClubRole::Member),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role {}", other),
            )),
        }
    }
}
