use std::sync::Arc;

use crate::address::repository::AddressRepository;
use crate::address::Address;
use crate::errors::ServiceError;

/// Application service in front of the address repository.
///
/// Deliberately a one-to-one pass-through today: no validation, auditing or
/// transformation happens here. The layer exists as the seam where such
/// rules would land without touching the HTTP handlers, so do not expect
/// hidden logic below.
pub struct AddressService<R: AddressRepository> {
    repo: Arc<R>,
}

impl<R: AddressRepository> AddressService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Address>, ServiceError> {
        self.repo.list_all().await
    }

    pub async fn save(&self, address: Address) -> Result<Address, ServiceError> {
        self.repo.save(address).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.repo.delete_by_id(id).await
    }
}
