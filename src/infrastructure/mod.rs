pub mod history_csv;
pub mod model_store;
pub mod observability;
pub mod persistence;
pub mod repositories;

pub use model_store::{ModelArtifact, ModelStore};
pub use repositories::InMemoryParkingRepository;
