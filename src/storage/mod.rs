//! Payment proof file storage
//!
//! The server never serves proof files itself; a provider stores the bytes and
//! hands back a reference that is recorded in the `payment_proofs` table.

pub mod cloudinary;
pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub use cloudinary::CloudinaryStorage;
pub use local::LocalStorage;

/// File received from the upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where a provider put the file
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Public URL, or filename for local storage
    pub url: String,
    /// Identifier for deleting the file from the provider
    pub public_id: String,
}

#[async_trait]
pub trait ProofStorage: Send + Sync {
    async fn store(&self, file: UploadedFile, uploaded_at: DateTime<Utc>) -> Result<StoredFile>;

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Part of the original filename before the first '.'
pub fn base_name(original_name: &str) -> &str {
    original_name.split('.').next().unwrap_or(original_name)
}

/// `<unix-millis>-<name>` with characters outside `[A-Za-z0-9._-]` replaced
pub fn timestamped_name(name: &str, uploaded_at: DateTime<Utc>) -> String {
    let clean: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let clean = clean.trim_start_matches('.');
    let clean = if clean.is_empty() { "comprovativo" } else { clean };

    format!("{}-{}", uploaded_at.timestamp_millis(), clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("recibo.final.pdf"), "recibo");
        assert_eq!(base_name("foto"), "foto");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_timestamped_name() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(timestamped_name("recibo", at), "1700000000123-recibo");
        assert_eq!(
            timestamped_name("../transferência 1.png", at),
            "1700000000123-_transfer_ncia_1.png"
        );
        assert_eq!(timestamped_name("", at), "1700000000123-comprovativo");
    }
}
