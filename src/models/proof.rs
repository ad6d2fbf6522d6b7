use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment proof pointer record (the file itself lives with the upload provider)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProof {
    pub timestamp: DateTime<Utc>,
    pub nome: String,
    /// Payment channel (bank transfer, MB Way, ...)
    pub canal: String,
    /// Provider URL or local filename
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    /// Provider identifier used to delete the file later
    pub public_id: Option<String>,
}
