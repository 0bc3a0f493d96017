//! Error types of the dataset loader.

use crate::dataset::SubsetKind;
use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = DatasetError> = std::result::Result<T, E>;

/// The errors raised while building or inspecting a dataset index.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset root '{}' is not available", .path.display())]
    DatasetRootNotFound { path: PathBuf },

    #[error("annotation file '{}' is not available", .path.display())]
    MissingAnnotationFile { path: PathBuf },

    #[error("no annotations for {segment}/{camera} in '{}'", .path.display())]
    MissingAnnotationEntry {
        path: PathBuf,
        segment: String,
        camera: String,
    },

    #[error("failed to parse annotation file '{}'", .path.display())]
    InvalidAnnotationFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    MalformedAnnotationRecord(#[from] RecordIssue),

    #[error("invalid {component} path component {value:?}")]
    InvalidPathComponent {
        component: &'static str,
        value: String,
    },

    #[error("cannot select {requested} train ids out of {available} ids")]
    InvalidSplit { requested: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("subset '{subset}' has no tracklets")]
    EmptySubset { subset: SubsetKind },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An annotation record that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("malformed record #{index} in {segment}/{camera}: {reason}")]
pub struct RecordIssue {
    pub segment: String,
    pub camera: String,
    /// Position of the record in its annotation source.
    pub index: usize,
    pub reason: String,
}
