// ABOUTME: Persistence of uploaded post images
// ABOUTME: Writes files under generated unique names inside the upload directory

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to store upload {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: Arc<PathBuf>,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `bytes` and return the generated filename
    pub async fn save(&self, content_type: Option<&str>, bytes: &[u8]) -> Result<String, UploadError> {
        let name = postboard_core::upload_filename(content_type);
        let path = self.dir.join(&name);

        let write = async {
            tokio::fs::create_dir_all(self.dir.as_path()).await?;
            tokio::fs::write(&path, bytes).await
        };
        write.await.map_err(|source| UploadError::Write {
            name: name.clone(),
            source,
        })?;

        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(name)
    }

    /// Remove a stored file, logging instead of failing
    pub async fn discard(&self, name: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
            warn!("Failed to remove upload {}: {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));

        let name = store.save(Some("image/png"), b"png-bytes").await.unwrap();
        assert!(name.ends_with(".png"));

        let stored = tokio::fs::read(store.dir().join(&name)).await.unwrap();
        assert_eq!(stored, b"png-bytes");

        store.discard(&name).await;
        assert!(!store.dir().join(&name).exists());
    }
}
