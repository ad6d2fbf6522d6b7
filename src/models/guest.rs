use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{STATUS_CONFIRMED_PREFIX, STATUS_INVITE_OPENED, STATUS_PENDING};

/// Attendance state of an invitee
///
/// `Pending -> InviteOpened -> Confirmed(n)`, with `Confirmed(n) -> Confirmed(m)`
/// on repeated RSVPs. `Custom` holds any status set by hand outside this
/// server; it blocks automatic transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GuestStatus {
    Pending,
    InviteOpened,
    Confirmed(String),
    Custom(String),
}

impl GuestStatus {
    /// Parse a stored/imported label
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == STATUS_PENDING {
            return GuestStatus::Pending;
        }
        if label == STATUS_INVITE_OPENED {
            return GuestStatus::InviteOpened;
        }
        if let Some(rest) = label.strip_prefix(STATUS_CONFIRMED_PREFIX) {
            let party = rest.trim();
            let party = party
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .unwrap_or(party);
            return GuestStatus::Confirmed(party.trim().to_string());
        }
        GuestStatus::Custom(label.to_string())
    }

    /// Whether an RSVP may overwrite this status with `Confirmed`
    pub fn accepts_confirmation(&self) -> bool {
        !matches!(self, GuestStatus::Custom(_))
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestStatus::Pending => f.write_str(STATUS_PENDING),
            GuestStatus::InviteOpened => f.write_str(STATUS_INVITE_OPENED),
            GuestStatus::Confirmed(party) => write!(f, "{} ({})", STATUS_CONFIRMED_PREFIX, party),
            GuestStatus::Custom(label) => f.write_str(label),
        }
    }
}

impl From<String> for GuestStatus {
    fn from(label: String) -> Self {
        GuestStatus::from_label(&label)
    }
}

impl From<GuestStatus> for String {
    fn from(status: GuestStatus) -> Self {
        status.to_string()
    }
}

/// Guest record stored in redb, keyed by the normalized name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "ChaveUnica")]
    pub unique_key: Option<String>,
    #[serde(rename = "Status")]
    pub status: GuestStatus,
    #[serde(rename = "deviceToken")]
    pub device_token: Option<String>,
    #[serde(rename = "Mesa")]
    pub table: Option<String>,
}

impl Guest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_key: None,
            status: GuestStatus::Pending,
            device_token: None,
            table: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// One entry of the guest list file
#[derive(Debug, Clone, Deserialize)]
pub struct GuestImport {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "ChaveUnica", default)]
    pub unique_key: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "deviceToken", default)]
    pub device_token: Option<String>,
    #[serde(rename = "Mesa", default)]
    pub table: Option<String>,
}

impl From<GuestImport> for Guest {
    fn from(entry: GuestImport) -> Self {
        Self {
            name: entry.name.trim().to_string(),
            unique_key: entry.unique_key,
            status: entry
                .status
                .as_deref()
                .map(GuestStatus::from_label)
                .unwrap_or(GuestStatus::Pending),
            device_token: entry.device_token.filter(|t| !t.is_empty()),
            table: entry.table.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Guest as shown in the admin panel (device token withheld)
#[derive(Debug, Clone, Serialize)]
pub struct GuestSummary {
    pub nome: String,
    pub status: GuestStatus,
    pub mesa: Option<String>,
    #[serde(rename = "deviceBound")]
    pub device_bound: bool,
}

impl From<Guest> for GuestSummary {
    fn from(guest: Guest) -> Self {
        Self {
            nome: guest.name,
            status: guest.status,
            mesa: guest.table,
            device_bound: guest.device_token.is_some(),
        }
    }
}
