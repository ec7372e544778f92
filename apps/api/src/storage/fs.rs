use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;

use crate::errors::AppError;
use crate::storage::ResumeStore;

/// Filesystem-backed resume storage under a configured root directory.
pub struct FsResumeStore {
    root: PathBuf,
}

impl FsResumeStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ResumeStore for FsResumeStore {
    async fn save(&self, key: &str, data: Bytes) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("creating upload dir: {e}")))?;

        // Write and sync before returning so the key is durably referenced
        // by the time the caller commits the database row.
        let path = self.path_for(key);
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Storage(format!("creating {}: {e}", path.display())))?;
        file.write_all(&data)
            .await
            .map_err(|e| AppError::Storage(format!("writing {}: {e}", path.display())))?;
        file.sync_all()
            .await
            .map_err(|e| AppError::Storage(format!("syncing {}: {e}", path.display())))?;

        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Bytes>, AppError> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "reading {}: {e}",
                path.display()
            ))),
        }
    }
}
