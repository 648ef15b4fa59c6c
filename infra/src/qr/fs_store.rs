//! Filesystem image store

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use vg_core::ImageStore;

use crate::InfrastructureError;

/// Writes images into a single output directory
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve `filename` inside the output directory
    ///
    /// Only plain file names are accepted; anything with a path component is
    /// rejected.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, InfrastructureError> {
        let is_plain = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && filename != "."
            && filename != "..";
        if !is_plain {
            return Err(InfrastructureError::Config(format!(
                "Invalid image file name: {}",
                filename
            )));
        }
        Ok(self.dir.join(filename))
    }

    /// Create the output directory if missing
    pub async fn ensure_dir(&self) -> Result<(), InfrastructureError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub async fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, InfrastructureError> {
        let path = self.path_for(filename)?;
        self.ensure_dir().await?;
        tokio::fs::write(&path, bytes).await?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), String> {
        self.write(filename, bytes)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(tmp.path().join("qrcodes"));

        store.save("qr_1.png", b"png-bytes").await.unwrap();

        let written = std::fs::read(tmp.path().join("qrcodes/qr_1.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_rejects_path_components() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsImageStore::new(tmp.path());

        for bad in ["", ".", "..", "../escape.png", "nested/qr.png", "a\\b.png"] {
            assert!(store.save(bad, b"x").await.is_err(), "accepted {:?}", bad);
        }
    }
}
