use serde::{Deserialize, Serialize};

use sparktrack_core::models::evaluation::ExternalEvaluator;
use sparktrack_core::models::role::Role;

/// How much of the session a denial wipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// Missing, malformed or expired token: forget everything.
    All,
    /// Role mismatch: drop the token and role, keep cached groups and
    /// evaluator contact details.
    TokenAndRole,
}

/// Client-held session state with one typed schema.
///
/// Passed explicitly to whatever needs it; there is no global store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub student_token: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub evaluator: Option<ExternalEvaluator>,
}

impl SessionContext {
    pub fn login(&mut self, token: impl Into<String>, role: Role) {
        self.token = Some(token.into());
        self.role = Some(role);
    }

    pub fn login_student(&mut self, token: impl Into<String>) {
        self.student_token = Some(token.into());
    }

    pub fn logout(&mut self) {
        self.clear(Clearance::All);
    }

    pub fn clear(&mut self, clearance: Clearance) {
        match clearance {
            Clearance::All => *self = SessionContext::default(),
            Clearance::TokenAndRole => {
                self.token = None;
                self.role = None;
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}
