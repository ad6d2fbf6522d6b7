use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_MESSAGE_CHARS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestbookMessage {
    pub timestamp: DateTime<Utc>,
    pub nome: String,
    pub message: String,
}

impl GuestbookMessage {
    /// Length is counted in characters, not bytes
    pub fn validate_text(text: &str) -> bool {
        text.chars().count() <= MAX_MESSAGE_CHARS
    }
}
