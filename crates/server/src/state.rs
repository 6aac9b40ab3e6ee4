use std::sync::Arc;

use service::vehicle::VehicleRepository;

/// Shared application state: the storage dependency handed to every
/// handler. Handlers themselves hold no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn VehicleRepository>,
}

impl AppState {
    pub fn new(repo: impl VehicleRepository + 'static) -> Self {
        Self { repo: Arc::new(repo) }
    }
}
