use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A guest's gift registry choice; one per normalized guest name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftSelection {
    pub timestamp: DateTime<Utc>,
    /// Name as sent on the latest submission
    pub nome: String,
    pub gifts: Vec<String>,
}
