pub mod gift;
pub mod guest;
pub mod message;
pub mod proof;
pub mod rsvp;

pub use gift::GiftSelection;
pub use guest::{Guest, GuestImport, GuestStatus, GuestSummary};
pub use message::GuestbookMessage;
pub use proof::PaymentProof;
pub use rsvp::{RsvpRecord, RsvpWithTable};

/// Lookup key for name matching across collections: trimmed and lowercased.
///
/// Only used as a key; records keep the name exactly as it was submitted.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Trimmed value, or `None` when the field is absent or blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
