//! File upload seam to the host's object storage

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A file ready to be written to object storage
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// Raw content
    pub bytes: Bytes,
    /// Object key, e.g. `tmp/openai/audio/<id>.mp3`
    pub key: String,
    /// MIME type stored with the object
    pub mime_type: String,
}

impl UploadFile {
    /// Create an upload request
    pub fn new(bytes: Bytes, key: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            key: key.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Uploads files and returns a publicly resolvable URL
#[async_trait]
pub trait FileUploader: Send + Sync {
    /// Store `file` and return its URL
    async fn upload(&self, file: UploadFile) -> Result<String>;
}
