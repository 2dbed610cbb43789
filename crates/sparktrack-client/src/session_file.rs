//! The persisted client session: token, role, cached groups and evaluator
//! contact details, plus the API base URL they belong to.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sparktrack_auth::session::SessionContext;

use crate::error::ClientError;

/// Current session file version. Bump this when changing shape, and add the
/// matching step to [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    /// Missing or 0 = the flat pre-versioned layout.
    #[serde(default)]
    pub config_version: u32,
    pub api_base: String,
    #[serde(default)]
    pub session: SessionContext,
}

impl SessionFile {
    pub fn new(api_base: impl Into<String>, session: SessionContext) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base: api_base.into(),
            session,
        }
    }
}

fn session_dir() -> Result<PathBuf, ClientError> {
    let base = dirs::config_dir()
        .ok_or_else(|| ClientError::SessionFile("no config directory found".to_string()))?;
    Ok(base.join("sparktrack"))
}

pub fn default_path() -> Result<PathBuf, ClientError> {
    Ok(session_dir()?.join("session.json"))
}

pub fn load_session() -> Result<Option<SessionFile>, ClientError> {
    load_session_from(&default_path()?)
}

pub fn save_session(file: &SessionFile) -> Result<(), ClientError> {
    save_session_to(&default_path()?, file)
}

pub fn delete_session() -> Result<(), ClientError> {
    delete_session_at(&default_path()?)
}

/// `Ok(None)` when no session has been saved yet.
pub fn load_session_from(path: &Path) -> Result<Option<SessionFile>, ClientError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let json: Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    Ok(Some(serde_json::from_value(migrated)?))
}

/// Sequential pure transforms from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: Value, from_version: u32) -> Result<Value, ClientError> {
    if from_version > CURRENT_VERSION {
        return Err(ClientError::SessionFile(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 -> v1: session keys moved under "session", api_base added.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ClientError::SessionFile("session file is not a JSON object".into()))?;

        let mut session = serde_json::Map::new();
        for key in ["token", "student_token", "role", "groups", "evaluator"] {
            if let Some(value) = obj.remove(key) {
                session.insert(key.to_string(), value);
            }
        }
        obj.insert("session".to_string(), Value::Object(session));
        obj.entry("api_base")
            .or_insert(Value::String(DEFAULT_API_BASE.to_string()));
        obj.insert("config_version".to_string(), Value::Number(1.into()));
        tracing::info!("migrated session file v0 -> v1");
    }

    Ok(json)
}

pub fn save_session_to(path: &Path, file: &SessionFile) -> Result<(), ClientError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut stamped = file.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    match std::fs::remove_file(&tmp_path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    // Owner-only from creation; the file holds a bearer token.
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut tmp = options.open(&tmp_path)?;
    tmp.write_all(json.as_bytes())?;
    tmp.sync_all()?;
    drop(tmp);

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "session saved");
    Ok(())
}

pub fn delete_session_at(path: &Path) -> Result<(), ClientError> {
    if path.exists() {
        std::fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "session deleted");
    }
    Ok(())
}
