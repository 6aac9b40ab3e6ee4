use thiserror::Error;

/// Storage-layer failures, tagged so callers can pick the right reply.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("a vehicle with this VIN already exists")]
    DuplicateVin,
    #[error("storage error: {0}")]
    Db(String),
}
