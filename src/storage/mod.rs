//! Photo file store.
//!
//! [`PhotoStorage`] persists uploaded bytes under a generated, opaque
//! filename. [`DirectoryPhotoStorage`] keeps them in one flat directory
//! that the router also serves read-only under `/uploads`.

mod filesystem;

use async_trait::async_trait;

pub use filesystem::DirectoryPhotoStorage;

/// Failure reported by a [`PhotoStorage`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Blob storage for uploaded venue photos.
#[async_trait]
pub trait PhotoStorage: Send + Sync + std::fmt::Debug {
    /// Stores `data` and returns the generated filename.
    ///
    /// The filename keeps the extension of `original_name`, if it has one.
    async fn put(&self, original_name: Option<&str>, data: &[u8]) -> Result<String, StorageError>;
}
