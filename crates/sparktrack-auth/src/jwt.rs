use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use sparktrack_core::models::role::Role;
use sparktrack_core::models::session::{Claims, Session};

use crate::error::AuthError;

/// Decode a token's claims without checking its signature.
///
/// The result is advisory: good enough to pick what to render, never good
/// enough to authorize anything. The server re-verifies every request with
/// [`validate_token`].
pub fn decode_unverified(token: &str) -> Result<Claims, AuthError> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::InvalidToken("expected three segments".to_string()));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("payload is not base64url: {e}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Issue an HS256 token for `subject` carrying `role`, valid for `ttl` from `now`.
pub fn issue_token(
    subject: &str,
    role: Role,
    ttl: Duration,
    secret: &[u8],
    now: jiff::Timestamp,
) -> Result<String, AuthError> {
    let iat = now.as_second();
    let exp = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| iat.checked_add(secs))
        .ok_or_else(|| AuthError::InvalidToken(format!("token lifetime {ttl:?} is out of range")))?;
    let claims = Claims {
        sub: subject.to_string(),
        role: Some(role.as_str().to_string()),
        iat: Some(iat),
        exp: Some(exp),
    };
    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Verify signature and expiry, then require a known role claim.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<Session, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(
        |e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::Jwt(e),
        },
    )?;

    session_from_claims(data.claims, token)
}

/// Build a [`Session`] from decoded claims. Fails on a missing or unknown
/// role, or on a missing expiry.
pub fn session_from_claims(claims: Claims, raw_token: &str) -> Result<Session, AuthError> {
    let raw_role = claims.role.ok_or(AuthError::MissingRole)?;
    let role = Role::parse(&raw_role).ok_or(AuthError::UnknownRole(raw_role))?;
    let exp = claims
        .exp
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".to_string()))?;
    let expires_at = jiff::Timestamp::from_second(exp)
        .map_err(|e| AuthError::InvalidToken(format!("exp out of range: {e}")))?;
    let issued_at = claims
        .iat
        .and_then(|iat| jiff::Timestamp::from_second(iat).ok());

    Ok(Session {
        subject_id: claims.sub,
        role,
        issued_at,
        expires_at,
        raw_token: raw_token.to_string(),
    })
}
