use serde::{Deserialize, Serialize};

use super::role::Role;

/// Raw token claims. `role` is kept as a string so tokens carrying an unknown
/// or missing role still decode and can be denied explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// An admitted session: a token whose claims carried a known role and an
/// expiry that had not passed at admission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub subject_id: String,
    pub role: Role,
    pub issued_at: Option<jiff::Timestamp>,
    pub expires_at: jiff::Timestamp,
    pub raw_token: String,
}

impl Session {
    pub fn is_expired(&self, now: jiff::Timestamp) -> bool {
        self.expires_at <= now
    }
}
