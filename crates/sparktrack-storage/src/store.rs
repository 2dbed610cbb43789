use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::database::Database;
use crate::error::StorageError;
use crate::state;

/// The database behind a lock, persisted to one JSON file.
///
/// Writes run against a copy; the copy is flushed to disk and only then
/// swapped in, so a failed closure or a failed flush leaves nothing behind.
/// Concurrent writers serialize on the lock, which is what makes
/// check-then-write rules (one external submission per group) hold.
pub struct Store {
    path: PathBuf,
    db: Mutex<Database>,
}

impl Store {
    /// Open the state file at `path`, starting empty if it does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let db = match state::load_state::<Database>(&path).await {
            Ok(db) => {
                tracing::info!(path = %path.display(), revision = db.revision, "database loaded");
                db
            }
            Err(StorageError::NotFound { .. }) => {
                tracing::info!(path = %path.display(), "no database found, starting empty");
                Database::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            db: Mutex::new(db),
        })
    }

    /// In-memory store seeded with `db`, flushing to `path`.
    pub fn with_database(path: impl Into<PathBuf>, db: Database) -> Self {
        Self {
            path: path.into(),
            db: Mutex::new(db),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        let db = self.db.lock().await;
        f(&db)
    }

    pub async fn write<R, E>(&self, f: impl FnOnce(&mut Database) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let mut db = self.db.lock().await;
        let mut draft = db.clone();
        let result = f(&mut draft)?;
        draft.revision += 1;
        state::save_state(&self.path, &draft).await?;
        *db = draft;
        Ok(result)
    }
}
