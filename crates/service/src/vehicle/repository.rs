use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use models::vehicle::Vehicle;

use crate::errors::ServiceError;

/// Storage accessor for the vehicle collection.
///
/// `find_by_vin` signals "no such record" with `None` and `delete_by_vin`
/// with `false`; both are distinct from `Err`, which always means the
/// storage layer itself failed.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Vehicle>, ServiceError>;
    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, ServiceError>;
    async fn insert(&self, vehicle: Vehicle) -> Result<(), ServiceError>;
    async fn delete_by_vin(&self, vin: &str) -> Result<bool, ServiceError>;
}

/// MongoDB-backed repository implementation.
pub struct MongoVehicleRepository {
    collection: Collection<Vehicle>,
}

/// Server-side error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

impl MongoVehicleRepository {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }

    /// Create the unique sparse index on `vin`. The uniqueness invariant
    /// on the collection depends on it, so the caller must not serve
    /// requests until this has succeeded.
    pub async fn ensure_vin_index(&self) -> Result<(), ServiceError> {
        let options = IndexOptions::builder()
            .unique(true)
            .sparse(true)
            .background(true)
            .build();
        let index = IndexModel::builder()
            .keys(doc! { "vin": 1 })
            .options(options)
            .build();
        self.collection
            .create_index(index)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for MongoVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, ServiceError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let vehicles: Vec<Vehicle> = cursor
            .try_collect()
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(vehicles)
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, ServiceError> {
        self.collection
            .find_one(doc! { "vin": vin })
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, vehicle: Vehicle) -> Result<(), ServiceError> {
        match self.collection.insert_one(&vehicle).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(ServiceError::DuplicateVin),
            Err(e) => Err(ServiceError::Db(e.to_string())),
        }
    }

    async fn delete_by_vin(&self, vin: &str) -> Result<bool, ServiceError> {
        let result = self
            .collection
            .delete_one(doc! { "vin": vin })
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(result.deleted_count > 0)
    }
}
