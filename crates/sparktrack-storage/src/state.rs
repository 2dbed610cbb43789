use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;

/// Load a JSON state file.
pub async fn load_state<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Save a JSON state file: write a sibling temp file, then rename over the
/// target so readers never see a partial file.
pub async fn save_state<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(value)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json).await?;
    tokio::fs::rename(&tmp_path, path).await?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "state flushed to disk");
    Ok(())
}
