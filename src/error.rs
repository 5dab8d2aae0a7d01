// src/error.rs
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("cannot list directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document {index} is not valid YAML: {reason}")]
    MalformedDocument { index: usize, reason: String },

    #[error("unexpected kind '{found}', expected 'Cluster'")]
    UnexpectedKind { found: String },

    #[error("cluster manifest has no metadata.name")]
    MissingIdentity,

    #[error("malformed spec: {reason}")]
    MalformedSpec { reason: String },

    #[error("cluster '{name}' is missing annotation {key}")]
    MissingAnnotation { name: String, key: &'static str },

    #[error("cluster '{name}' has invalid value '{value}' for annotation {key}")]
    InvalidAnnotation {
        name: String,
        key: &'static str,
        value: String,
    },

    #[error("cluster '{name}' is flagged as pilot config store but '{existing}' already is")]
    DuplicatePilot { name: String, existing: String },

    #[error("cluster '{name}' not found")]
    NotFound { name: String },

    #[error("invalid loader config: {0}")]
    Config(String),
}

impl RegistryError {
    pub fn malformed_spec(reason: impl Into<String>) -> Self {
        Self::MalformedSpec {
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DirectoryUnreadable { .. } | Self::Config(_))
    }
}

#[derive(Debug)]
pub struct LoadFailure {
    pub source_path: PathBuf,
    // stream position in the file, blank documents included
    pub document: Option<usize>,
    pub error: RegistryError,
}

impl LoadFailure {
    pub fn for_file(source_path: impl Into<PathBuf>, error: RegistryError) -> Self {
        Self {
            source_path: source_path.into(),
            document: None,
            error,
        }
    }

    pub fn for_document(
        source_path: impl Into<PathBuf>,
        document: usize,
        error: RegistryError,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            document: Some(document),
            error,
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.document {
            Some(index) => write!(
                f,
                "{} (document {}): {}",
                self.source_path.display(),
                index,
                self.error
            ),
            None => write!(f, "{}: {}", self.source_path.display(), self.error),
        }
    }
}
