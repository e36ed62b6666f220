//! Directory-backed photo storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use super::{PhotoStorage, StorageError};

/// Flat-directory photo store.
///
/// Files are named `<unix millis><.ext>`. Two uploads landing in the same
/// millisecond with the same extension collide and the later one wins.
#[derive(Debug, Clone)]
pub struct DirectoryPhotoStorage {
    root: PathBuf,
}

impl DirectoryPhotoStorage {
    /// Opens the store, creating `root` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError::Io`] if the directory cannot be created.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Builds `<millis><.ext>` from the upload's original name.
fn generate_filename(millis: i64, original_name: Option<&str>) -> String {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!("{millis}{extension}")
}

#[async_trait]
impl PhotoStorage for DirectoryPhotoStorage {
    async fn put(&self, original_name: Option<&str>, data: &[u8]) -> Result<String, StorageError> {
        let filename = generate_filename(Utc::now().timestamp_millis(), original_name);
        fs::write(self.root.join(&filename), data).await?;
        tracing::debug!(%filename, bytes = data.len(), "photo stored");
        Ok(filename)
    }
}
