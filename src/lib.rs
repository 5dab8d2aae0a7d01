pub mod cluster;
pub mod config;
pub mod error;
pub mod manifest;
pub mod registry;

pub use cluster::{ClusterRecord, ClusterValidator, ServerEndpoint};
pub use config::{LoaderConfig, PilotFlagPolicy};
pub use error::{LoadFailure, RegistryError};
pub use registry::{ClusterStore, LoadOutcome, RegistryLoader};
