use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{multipart, Client};
use serde::Deserialize;

use crate::config::CloudinaryConfig;
use crate::constants::{CLOUDINARY_FOLDER, CLOUDINARY_FORMAT};
use crate::error::{AppError, Result};
use crate::security::cloudinary_signature;
use crate::storage::{base_name, ProofStorage, StoredFile, UploadedFile};

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Signed uploads to Cloudinary, converted to JPG in a dedicated folder
#[derive(Debug, Clone)]
pub struct CloudinaryStorage {
    config: CloudinaryConfig,
    client: Client,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            CLOUDINARY_API_BASE, self.config.cloud_name
        )
    }

    /// Signed form parameters, excluding the file itself
    fn signed_params(&self, public_id: &str, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("folder", CLOUDINARY_FOLDER.to_string()),
            ("format", CLOUDINARY_FORMAT.to_string()),
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.to_string()),
        ];
        let signature = cloudinary_signature(&params, &self.config.api_secret);

        params.push(("api_key", self.config.api_key.clone()));
        params.push(("signature_algorithm", "sha256".to_string()));
        params.push(("signature", signature));
        params
    }
}

/// `<unix-millis>-<base name>`, the id the file gets inside the folder
fn public_id_for(original_name: &str, uploaded_at: DateTime<Utc>) -> String {
    format!("{}-{}", uploaded_at.timestamp_millis(), base_name(original_name))
}

#[async_trait]
impl ProofStorage for CloudinaryStorage {
    async fn store(&self, file: UploadedFile, uploaded_at: DateTime<Utc>) -> Result<StoredFile> {
        let public_id = public_id_for(&file.original_name, uploaded_at);

        let mut part = multipart::Part::bytes(file.bytes).file_name(file.original_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::InvalidInput(format!("Invalid content type: {}", e)))?;
        }

        let mut form = multipart::Form::new().part("file", part);
        for (key, value) in self.signed_params(&public_id, uploaded_at.timestamp()) {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Cloudinary: {}", e);
                AppError::UploadProvider(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|r| r.error.message)
                .unwrap_or_else(|_| status.to_string());
            tracing::error!("Cloudinary upload rejected ({}): {}", status, message);
            return Err(AppError::UploadProvider(message));
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Cloudinary response: {}", e);
            AppError::UploadProvider(e.to_string())
        })?;

        tracing::info!("Proof uploaded to Cloudinary: {}", uploaded.public_id);

        Ok(StoredFile {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}
