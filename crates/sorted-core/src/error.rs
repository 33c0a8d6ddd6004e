use std::path::PathBuf;

/// Central error type for the sorted system.
#[derive(Debug, thiserror::Error)]
pub enum SortedError {
    #[error("invalid collection data: {path}")]
    InvalidCollectionData { path: PathBuf },

    #[error("collection already exists: {path}")]
    CollectionAlreadyExists { path: PathBuf },

    #[error("title is not a valid file name: {title:?}")]
    InvalidTitle { title: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("entry not found: {id}")]
    EntryNotFound { id: String },

    #[error("mismatched collection type: {src} vs {dest}")]
    MismatchedCollectionType { src: String, dest: String },

    #[error("resolution failed for {locator}: {message}")]
    Resolution { locator: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
