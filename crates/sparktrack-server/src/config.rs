use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEV_JWT_SECRET: &str = "sparktrack-development-secret";
const DEFAULT_TOKEN_TTL_SECS: u64 = 8 * 60 * 60;
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub data_path: PathBuf,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// When set, an `admin` account with this password is created at startup
    /// if none exists.
    pub admin_password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let bind = env::var("SPARKTRACK_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let data_path = env::var("SPARKTRACK_DATA_PATH")
            .unwrap_or_else(|_| "./sparktrack-data.json".to_string())
            .into();

        let jwt_secret = match env::var("SPARKTRACK_JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("SPARKTRACK_JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            _ => return Err(eyre::eyre!("SPARKTRACK_JWT_SECRET must be set")),
        };

        let token_ttl = match env::var("SPARKTRACK_TOKEN_TTL_SECS") {
            Ok(raw) => parse_token_ttl(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
        };

        let admin_password = env::var("SPARKTRACK_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Ok(Self {
            bind,
            data_path,
            jwt_secret,
            token_ttl,
            admin_password,
        })
    }
}

/// Token lifetime in whole seconds, between one second and thirty days.
pub fn parse_token_ttl(raw: &str) -> eyre::Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| eyre::eyre!("invalid SPARKTRACK_TOKEN_TTL_SECS '{raw}': {e}"))?;
    if secs == 0 || secs > MAX_TOKEN_TTL_SECS {
        return Err(eyre::eyre!(
            "SPARKTRACK_TOKEN_TTL_SECS must be between 1 and {MAX_TOKEN_TTL_SECS}, got {secs}"
        ));
    }
    Ok(Duration::from_secs(secs))
}
