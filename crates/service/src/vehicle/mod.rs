pub mod memory;
pub mod repository;

pub use memory::MemoryVehicleRepository;
pub use repository::{MongoVehicleRepository, VehicleRepository};
