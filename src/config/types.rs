// config/types.rs
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::RegistryError;

/// What to do with a `pilotCfgStore` annotation that is not a boolean literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PilotFlagPolicy {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub directory: PathBuf,
    /// Glob matched against file names, e.g. `*.yaml`.
    pub file_pattern: String,
    pub pilot_flag: PilotFlagPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/etc/istio/clusterregistry"),
            file_pattern: "*".to_string(),
            pilot_flag: PilotFlagPolicy::Lenient,
        }
    }
}

impl LoaderConfig {
    pub fn load_from_file(path: &str) -> Result<Self, RegistryError> {
        let config_str = fs::read_to_string(path)
            .map_err(|e| RegistryError::config(format!("cannot read {}: {}", path, e)))?;
        let config: Self = serde_json::from_str(&config_str)
            .map_err(|e| RegistryError::config(format!("cannot parse {}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), RegistryError> {
        let config_str =
            serde_json::to_string_pretty(self).map_err(|e| RegistryError::config(e.to_string()))?;
        fs::write(path, config_str)
            .map_err(|e| RegistryError::config(format!("cannot write {}: {}", path, e)))
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.directory.as_os_str().is_empty() {
            return Err(RegistryError::config("directory must not be empty"));
        }
        self.compiled_pattern().map(|_| ())
    }

    pub fn compiled_pattern(&self) -> Result<glob::Pattern, RegistryError> {
        glob::Pattern::new(&self.file_pattern).map_err(|e| {
            RegistryError::config(format!("bad file pattern '{}': {}", self.file_pattern, e))
        })
    }

    pub fn expanded_directory(&self) -> PathBuf {
        expand_tilde(&self.directory)
    }
}

pub(crate) fn expand_tilde(path: &std::path::Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).to_string()),
        None => path.to_path_buf(),
    }
}
