use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Academic year of a group, taken from the group id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum YearPrefix {
    /// Second year.
    SY,
    /// Third year.
    TY,
    /// Final ("last") year.
    LY,
}

impl YearPrefix {
    pub fn from_group_id(group_id: &str) -> Result<YearPrefix, CoreError> {
        let prefix: String = group_id.trim().chars().take(2).collect();
        match prefix.to_ascii_uppercase().as_str() {
            "SY" => Ok(YearPrefix::SY),
            "TY" => Ok(YearPrefix::TY),
            "LY" => Ok(YearPrefix::LY),
            _ => Err(CoreError::InvalidGroupId(group_id.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YearPrefix::SY => "SY",
            YearPrefix::TY => "TY",
            YearPrefix::LY => "LY",
        }
    }
}

impl fmt::Display for YearPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Member {
    pub enrollment_no: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Group {
    pub group_id: String,
    pub year: YearPrefix,
    pub guide_name: String,
    pub members: Vec<Member>,
}

/// Admin input for "add group". The year is derived from the id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewGroup {
    pub group_id: String,
    pub guide_name: String,
    pub members: Vec<Member>,
}

impl NewGroup {
    pub fn into_group(self) -> Result<Group, CoreError> {
        let year = YearPrefix::from_group_id(&self.group_id)?;
        Ok(Group {
            group_id: self.group_id.trim().to_string(),
            year,
            guide_name: self.guide_name,
            members: self.members,
        })
    }
}
