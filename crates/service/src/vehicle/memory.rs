use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use models::vehicle::Vehicle;

use crate::errors::ServiceError;
use crate::vehicle::repository::VehicleRepository;

/// In-memory repository keyed by VIN.
///
/// Matches the MongoDB implementation's semantics, including duplicate
/// rejection, without needing a running server. Backs the HTTP tests.
#[derive(Clone, Default)]
pub struct MemoryVehicleRepository {
    inner: Arc<RwLock<HashMap<String, Vehicle>>>,
}

impl MemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for MemoryVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.values().cloned().collect())
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(vin).cloned())
    }

    async fn insert(&self, vehicle: Vehicle) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        if map.contains_key(&vehicle.vin) {
            return Err(ServiceError::DuplicateVin);
        }
        map.insert(vehicle.vin.clone(), vehicle);
        Ok(())
    }

    async fn delete_by_vin(&self, vin: &str) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(vin).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(vin: &str) -> Vehicle {
        Vehicle {
            manufacturer: "Ford".into(),
            model: "Focus".into(),
            vin: vin.into(),
            regno: "AB12CDE".into(),
        }
    }

    #[tokio::test]
    async fn crud_roundtrip() {
        let repo = MemoryVehicleRepository::new();
        assert!(repo.list().await.expect("list").is_empty());

        repo.insert(sample("VIN-1")).await.expect("insert");
        let found = repo.find_by_vin("VIN-1").await.expect("find");
        assert_eq!(found, Some(sample("VIN-1")));

        assert!(repo.delete_by_vin("VIN-1").await.expect("delete"));
        assert_eq!(repo.find_by_vin("VIN-1").await.expect("find"), None);
    }

    #[tokio::test]
    async fn duplicate_vin_is_rejected() {
        let repo = MemoryVehicleRepository::new();
        repo.insert(sample("VIN-1")).await.expect("first insert");

        let err = repo.insert(sample("VIN-1")).await.expect_err("second insert");
        assert!(matches!(err, ServiceError::DuplicateVin));

        // Only the first record survives the collision.
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_unknown_vin_reports_not_found() {
        let repo = MemoryVehicleRepository::new();
        assert!(!repo.delete_by_vin("VIN-404").await.expect("delete"));
    }
}
