mod loader;
mod store;

pub use loader::{LoadOutcome, RegistryLoader};
pub use store::ClusterStore;
