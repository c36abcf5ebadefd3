// Cache store for reading and writing snapshots.
// Handles JSON serialization, atomic writes, and invalidation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{FigmaError, Result};

use super::paths::{self, CacheKey};

/// Distinguishes temp files of concurrent writers within this process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }
}

/// Durable key to snapshot store backed by one JSON file per key.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store in the platform cache directory.
    pub fn open_default() -> Result<Self> {
        paths::cache_dir()
            .map(Self::new)
            .ok_or_else(|| FigmaError::Other("Could not determine cache directory".to_string()))
    }

    /// Directory holding the snapshots.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the last snapshot stored under `key`.
    ///
    /// Missing, unreadable, or corrupt snapshots are reported as absent.
    pub fn load<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<CachedData<T>> {
        let path = key.path_in(&self.root);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(%key, error = %e, "failed reading cache entry");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(cached) => {
                debug!(%key, "cache hit");
                Some(cached)
            }
            Err(e) => {
                warn!(%key, error = %e, "discarding corrupt cache entry");
                None
            }
        }
    }

    /// Persist `data` under `key`, replacing any previous snapshot.
    pub fn store<T: Serialize>(&self, key: &CacheKey, data: &T) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let path = key.path_in(&self.root);
        let cached = CachedData::new(data);
        let json = serde_json::to_string_pretty(&cached)?;

        // Write atomically via a temp file unique to this writer
        let temp_path = path.with_extension(format!(
            "{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let written = write_synced(&temp_path, json.as_bytes())
            .and_then(|()| fs::rename(&temp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(%key, bytes = json.len(), "stored cache entry");
        Ok(())
    }

    /// [`Self::load`] on the blocking thread pool, for use from async tasks.
    pub async fn load_async<T>(&self, key: &CacheKey) -> Option<CachedData<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let store = self.clone();
        let key = key.clone();
        match tokio::task::spawn_blocking(move || store.load(&key)).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "cache read task failed");
                None
            }
        }
    }

    /// [`Self::store`] on the blocking thread pool, for use from async tasks.
    pub async fn store_async<T>(&self, key: &CacheKey, data: T) -> Result<()>
    where
        T: Serialize + Send + 'static,
    {
        let store = self.clone();
        let key = key.clone();
        tokio::task::spawn_blocking(move || store.store(&key, &data))
            .await
            .map_err(|e| FigmaError::Other(format!("cache write task failed: {}", e)))?
    }

    /// Remove the snapshot stored under `key`, if any.
    pub fn clear(&self, key: &CacheKey) -> Result<()> {
        match fs::remove_file(key.path_in(&self.root)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every persisted snapshot.
    pub fn clear_all(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0usize;
        for entry in entries {
            let path = entry?.path();
            let owned = path
                .extension()
                .is_some_and(|ext| ext == "json" || ext == "tmp");
            if owned && path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        debug!(removed, root = %self.root.display(), "cleared cache");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
