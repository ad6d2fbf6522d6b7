use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::error::Result;
use crate::storage::{timestamped_name, ProofStorage, StoredFile, UploadedFile};

/// Stores proofs in a directory on the server
///
/// Used when no Cloudinary credentials are configured. The stored filename is
/// both the reference and the public id.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ProofStorage for LocalStorage {
    async fn store(&self, file: UploadedFile, uploaded_at: DateTime<Utc>) -> Result<StoredFile> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = timestamped_name(&file.original_name, uploaded_at);
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, &file.bytes).await?;

        tracing::info!("Stored proof locally: {:?} ({} bytes)", path, file.bytes.len());

        Ok(StoredFile {
            url: file_name.clone(),
            public_id: file_name,
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
