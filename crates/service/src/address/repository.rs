use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::address::Address;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Persistence boundary for address records.
///
/// Contract notes:
/// - `list_all` carries no ordering guarantee.
/// - `save` is an upsert keyed on `id`: a payload whose id is missing, empty
///   or unknown to the store gets a freshly assigned identifier; a payload
///   with a stored id fully replaces that record.
/// - `delete_by_id` on an unknown id is a successful no-op, so retried
///   deletes never surface spurious errors.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Address>, ServiceError>;
    async fn save(&self, address: Address) -> Result<Address, ServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError>;
}

/// JSON file-backed repository implementation.
#[derive(Clone)]
pub struct JsonAddressRepository {
    store: Arc<JsonMapStore<String, Address>>,
}

impl JsonAddressRepository {
    /// Open the backing file, creating it with an empty map if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Address>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl AddressRepository for JsonAddressRepository {
    async fn list_all(&self) -> Result<Vec<Address>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn save(&self, address: Address) -> Result<Address, ServiceError> {
        let mut persisted = address;
        // Presence check and insert happen under one write lock so two
        // concurrent saves cannot both mint an id for the same record.
        self.store
            .update_map(|map| {
                let id = match persisted.id.as_deref() {
                    Some(id) if !id.is_empty() && map.contains_key(id) => id.to_string(),
                    _ => Uuid::new_v4().to_string(),
                };
                persisted.id = Some(id.clone());
                map.insert(id, persisted.clone());
                Ok(())
            })
            .await?;
        debug!(id = persisted.id.as_deref().unwrap_or_default(), "address saved");
        Ok(persisted)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        let existed = self.store.remove(&id.to_string()).await?;
        debug!(id, existed, "address delete");
        Ok(())
    }
}
