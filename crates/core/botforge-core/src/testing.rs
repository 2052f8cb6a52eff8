//! Testing utilities: in-memory host collaborators

use crate::types::{FileUploader, UploadFile};
use crate::{BotforgeError, Result};
use async_trait::async_trait;
use std::sync::RwLock;

/// Uploader that keeps objects in memory and returns `<base_url>/<key>`
#[derive(Debug)]
pub struct MemoryUploader {
    base_url: String,
    objects: RwLock<Vec<UploadFile>>,
}

impl MemoryUploader {
    /// Create an uploader serving objects under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(Vec::new()),
        }
    }

    /// Uploaded objects, in order
    pub fn objects(&self) -> Vec<UploadFile> {
        self.objects
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl FileUploader for MemoryUploader {
    async fn upload(&self, file: UploadFile) -> Result<String> {
        let url = format!("{}/{}", self.base_url, file.key);
        self.objects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(file);
        Ok(url)
    }
}

/// Uploader that always fails
#[derive(Debug, Default)]
pub struct FailingUploader;

#[async_trait]
impl FileUploader for FailingUploader {
    async fn upload(&self, file: UploadFile) -> Result<String> {
        Err(BotforgeError::storage(format!(
            "bucket rejected object '{}'",
            file.key
        )))
    }
}
