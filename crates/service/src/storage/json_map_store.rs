use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Holds a `HashMap<K, V>` behind an `RwLock` and rewrites the whole file
/// after every mutation. Suited to small datasets where a database is
/// overkill. Concurrent writers to the same key race; the last write to take
/// the lock wins.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map
    /// if it does not exist yet.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    // The old content is still on disk until the first
                    // mutation persists; the warning is the only trace of it.
                    warn!(path = %file_path.display(), error = %e, "unparseable data file, starting from an empty map");
                    HashMap::new()
                }
            },
            Err(_) => {
                let empty: HashMap<K, V> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(storage_err)?)
                    .await
                    .map_err(storage_err)?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(storage_err)?;
        fs::write(&self.file_path, data).await.map_err(storage_err)?;
        Ok(())
    }

    /// All values, in unspecified order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or replace the value at `key`, then persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        drop(map);
        self.persist().await
    }

    /// Remove a key, then persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let existed = map.remove(key).is_some();
        drop(map);
        self.persist().await?;
        Ok(existed)
    }

    /// Apply a mutation under a single write lock, then persist. Use this
    /// when the mutation has to observe current map state (e.g. upserts that
    /// check key presence).
    pub async fn update_map<F>(&self, f: F) -> Result<(), ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<(), ServiceError>,
    {
        let mut map = self.inner.write().await;
        f(&mut map)?;
        drop(map);
        self.persist().await?;
        Ok(())
    }
}

fn storage_err<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Storage(e.to_string())
}
