//! Route admission for the client.
//!
//! The gate decodes the locally held token without verifying it, so its
//! decisions only drive what the UI shows. The server checks every request
//! on its own.

use std::future::Future;

use sparktrack_core::models::role::Role;
use sparktrack_core::models::session::Session;

use crate::error::AuthError;
use crate::jwt;
use crate::session::{Clearance, SessionContext};

/// Why the gate refused a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDenial {
    MissingToken,
    MalformedToken(String),
    MissingRole,
    Expired,
    Forbidden { role: String },
}

impl GateDenial {
    pub fn clearance(&self) -> Clearance {
        match self {
            GateDenial::Forbidden { .. } => Clearance::TokenAndRole,
            _ => Clearance::All,
        }
    }
}

/// Decide whether `token` may enter a route open to `allowed` roles.
///
/// An empty `allowed` list admits any known role. Role comparison is
/// case-insensitive. A missing role claim denies regardless of expiry, and
/// an expired (or expiry-less) token denies regardless of role.
pub fn admit(
    token: Option<&str>,
    allowed: &[Role],
    now: jiff::Timestamp,
) -> Result<Session, GateDenial> {
    let token = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(GateDenial::MissingToken),
    };

    let claims =
        jwt::decode_unverified(token).map_err(|e| GateDenial::MalformedToken(e.to_string()))?;

    let Some(raw_role) = claims.role.clone() else {
        return Err(GateDenial::MissingRole);
    };

    match claims.exp {
        Some(exp) if exp > now.as_second() => {}
        _ => return Err(GateDenial::Expired),
    }

    let role = Role::parse(&raw_role).ok_or_else(|| GateDenial::Forbidden {
        role: raw_role.clone(),
    })?;
    if !allowed.is_empty() && !allowed.contains(&role) {
        return Err(GateDenial::Forbidden { role: raw_role });
    }

    jwt::session_from_claims(claims, token).map_err(|e| GateDenial::MalformedToken(e.to_string()))
}

/// Server-side confirmation that a token is still good.
pub trait SessionValidator {
    fn validate(&self, token: &str) -> impl Future<Output = Result<bool, AuthError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// `enter` has not run yet.
    Checking,
    /// Locally admitted; server confirmation still pending. Rendering is allowed.
    Optimistic(Session),
    /// Locally admitted and confirmed by the server (or exempt from confirmation).
    Confirmed(Session),
    Denied(GateDenial),
    /// Admitted locally, then rejected by the server.
    Revoked,
}

impl GuardState {
    pub fn allows_render(&self) -> bool {
        matches!(self, GuardState::Optimistic(_) | GuardState::Confirmed(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            GuardState::Optimistic(s) | GuardState::Confirmed(s) => Some(s),
            _ => None,
        }
    }
}

/// Per-route guard: admits optimistically, then applies the server's verdict.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed: Vec<Role>,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.to_vec(),
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn enter(&mut self, ctx: &mut SessionContext, now: jiff::Timestamp) -> &GuardState {
        self.state = match admit(ctx.token(), &self.allowed, now) {
            // Reviewer admins are never re-checked against the server.
            Ok(session) if session.role == Role::ReviewerAdmin => GuardState::Confirmed(session),
            Ok(session) => GuardState::Optimistic(session),
            Err(denial) => {
                tracing::info!(?denial, "route denied");
                ctx.clear(denial.clearance());
                GuardState::Denied(denial)
            }
        };
        &self.state
    }

    /// The token awaiting server confirmation, if any.
    pub fn pending_token(&self) -> Option<String> {
        match &self.state {
            GuardState::Optimistic(session) => Some(session.raw_token.clone()),
            _ => None,
        }
    }

    /// Apply a server verdict for `token`. Verdicts for a token that is no
    /// longer the pending one (guard re-entered, revoked, or the user logged
    /// in again) are dropped.
    pub fn apply_verdict(
        &mut self,
        ctx: &mut SessionContext,
        token: &str,
        verdict: Result<bool, AuthError>,
    ) -> &GuardState {
        let current = match &self.state {
            GuardState::Optimistic(session)
                if session.raw_token == token && ctx.token() == Some(token) =>
            {
                session.clone()
            }
            _ => {
                tracing::debug!("ignoring stale session verdict");
                return &self.state;
            }
        };

        self.state = match verdict {
            Ok(true) => GuardState::Confirmed(current),
            Ok(false) => {
                tracing::info!(subject = %current.subject_id, "server rejected session");
                ctx.clear(Clearance::All);
                GuardState::Revoked
            }
            Err(e) => {
                tracing::warn!(error = %e, "session validation failed, revoking");
                ctx.clear(Clearance::All);
                GuardState::Revoked
            }
        };
        &self.state
    }

    /// Ask `validator` about the pending token and apply its verdict.
    pub async fn revalidate<V: SessionValidator>(
        &mut self,
        ctx: &mut SessionContext,
        validator: &V,
    ) -> &GuardState {
        let Some(token) = self.pending_token() else {
            return &self.state;
        };
        let verdict = validator.validate(&token).await;
        self.apply_verdict(ctx, &token, verdict)
    }
}
