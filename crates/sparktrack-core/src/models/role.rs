use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Role {
    Admin,
    Mentor,
    External,
    ReviewerAdmin,
    Student,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Mentor,
        Role::External,
        Role::ReviewerAdmin,
        Role::Student,
    ];

    /// Case-insensitive parse. Separators are ignored, so `reviewerAdmin`,
    /// `REVIEWER_ADMIN` and `reviewer-admin` are the same role.
    pub fn parse(raw: &str) -> Option<Role> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "admin" => Some(Role::Admin),
            "mentor" => Some(Role::Mentor),
            "external" => Some(Role::External),
            "revieweradmin" => Some(Role::ReviewerAdmin),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Mentor => "mentor",
            Role::External => "external",
            Role::ReviewerAdmin => "reviewerAdmin",
            Role::Student => "student",
        }
    }

    /// Mentors may correct marks after submission; every other evaluator is
    /// locked out once a mark exists.
    pub fn can_edit_after_submission(&self) -> bool {
        matches!(self, Role::Mentor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}
