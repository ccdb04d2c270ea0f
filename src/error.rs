use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a dataset from loading at all. Bad individual rows
/// are counted in the `LoadReport` instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no `{0}` column")]
    MissingColumn(&'static str),
}

/// Returned when a second dataset is installed into the process-wide store.
#[derive(Debug, Error)]
#[error("dataset already loaded ({records} records); the store is immutable once loaded")]
pub struct AlreadyLoaded {
    pub records: usize,
}
