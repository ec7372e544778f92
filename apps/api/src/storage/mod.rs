pub mod fs;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

/// Blob storage seam for resume files.
///
/// `save` must have durably completed before the lead row is committed, so a
/// failed submission can only ever leave an orphaned file, never a row that
/// references a missing one.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn save(&self, key: &str, data: Bytes) -> Result<(), AppError>;

    async fn load(&self, key: &str) -> Result<Option<Bytes>, AppError>;
}
