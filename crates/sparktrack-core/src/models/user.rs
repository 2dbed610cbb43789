use serde::{Deserialize, Serialize};

use super::role::Role;

/// A login account. Only the server ever holds the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub role: Role,
    pub password_hash: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
