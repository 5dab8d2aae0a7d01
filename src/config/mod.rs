mod types;

pub(crate) use types::expand_tilde;
pub use types::{LoaderConfig, PilotFlagPolicy};
