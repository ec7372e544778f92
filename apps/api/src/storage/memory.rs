use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;
use crate::storage::ResumeStore;

/// In-memory resume storage for tests.
#[derive(Default)]
pub struct InMemoryResumeStore {
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn save(&self, key: &str, data: Bytes) -> Result<(), AppError> {
        self.blobs.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Bytes>, AppError> {
        Ok(self.blobs.lock().unwrap().get(key).cloned())
    }
}
