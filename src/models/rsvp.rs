use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attendance confirmation, append-only
///
/// `nome` is free text and need not match a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub timestamp: DateTime<Utc>,
    pub nome: String,
    /// Party size as typed by the guest
    pub guests: String,
    pub phone: String,
    pub message: String,
}

/// RSVP row joined with the matching guest's table, for the admin panel
#[derive(Debug, Clone, Serialize)]
pub struct RsvpWithTable {
    #[serde(flatten)]
    pub record: RsvpRecord,
    pub mesa: String,
}
